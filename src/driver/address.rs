//! 서버 주소
//!
//! 클러스터 멤버의 주소와 라우팅 URI 파싱

use std::fmt;

use super::error::{DriverError, DriverResult};

/// Bolt 기본 포트
pub const DEFAULT_PORT: u16 = 7687;

const URI_SCHEMES: [&str; 6] = [
    "zeta4g+ssc://",
    "zeta4g+s://",
    "zeta4g://",
    "bolt+ssc://",
    "bolt+s://",
    "bolt://",
];

const ROUTING_SCHEMES: [&str; 3] = ["zeta4g://", "zeta4g+s://", "zeta4g+ssc://"];

// ============================================================================
// ServerAddress - 서버 주소
// ============================================================================

/// 서버 주소
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    /// 호스트
    pub host: String,
    /// 포트
    pub port: u16,
}

impl ServerAddress {
    /// 새 서버 주소 생성
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// URI에서 파싱
    ///
    /// `host`, `host:port`, `zeta4g://host:port`, `bolt://host:port` 형식을 받습니다.
    pub fn from_uri(uri: &str) -> DriverResult<Self> {
        parse_host_port(strip_scheme(uri).trim())
    }

    /// 소켓 주소로 변환
    pub fn to_socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl Default for ServerAddress {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_PORT)
    }
}

fn strip_scheme(uri: &str) -> &str {
    URI_SCHEMES
        .iter()
        .find_map(|scheme| uri.strip_prefix(scheme))
        .unwrap_or(uri)
}

fn parse_host_port(addr: &str) -> DriverResult<ServerAddress> {
    let parts: Vec<&str> = addr.split(':').collect();
    let (host, port) = match parts.as_slice() {
        [host] => (*host, DEFAULT_PORT),
        [host, port] => {
            let port = port
                .parse()
                .map_err(|_| DriverError::configuration(format!("Invalid port in '{}'", addr)))?;
            (*host, port)
        }
        _ => return Err(DriverError::configuration(format!("Invalid server address '{}'", addr))),
    };

    if host.is_empty() {
        return Err(DriverError::configuration("Empty host in server address"));
    }

    Ok(ServerAddress::new(host, port))
}

/// URI가 라우팅 드라이버용인지 확인
pub fn is_routing_uri(uri: &str) -> bool {
    ROUTING_SCHEMES.iter().any(|scheme| uri.starts_with(scheme))
}

/// URI에서 다중 라우터 파싱
///
/// `zeta4g://server1:7687,server2` 처럼 쉼표로 구분된 시드 목록을 순서대로 반환합니다.
pub fn parse_routing_uri(uri: &str) -> DriverResult<Vec<ServerAddress>> {
    let mut routers = Vec::new();

    for addr_str in strip_scheme(uri).split(',') {
        let addr_str = addr_str.trim();
        if addr_str.is_empty() {
            continue;
        }
        routers.push(parse_host_port(addr_str)?);
    }

    if routers.is_empty() {
        return Err(DriverError::configuration("No routers specified"));
    }

    Ok(routers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uri() {
        let addr = ServerAddress::from_uri("zeta4g://server1:7688").unwrap();
        assert_eq!(addr, ServerAddress::new("server1", 7688));

        let addr = ServerAddress::from_uri("bolt+s://server2").unwrap();
        assert_eq!(addr, ServerAddress::new("server2", DEFAULT_PORT));

        let addr = ServerAddress::from_uri("router").unwrap();
        assert_eq!(addr.port, DEFAULT_PORT);
    }

    #[test]
    fn test_from_uri_invalid() {
        assert!(ServerAddress::from_uri("zeta4g://host:port").is_err());
        assert!(ServerAddress::from_uri("a:1:2").is_err());
        assert!(ServerAddress::from_uri("zeta4g://").is_err());
    }

    #[test]
    fn test_display() {
        let addr = ServerAddress::new("rd1", 7687);
        assert_eq!(addr.to_string(), "rd1:7687");
        assert_eq!(addr.to_socket_addr(), "rd1:7687");
    }

    #[test]
    fn test_is_routing_uri() {
        assert!(is_routing_uri("zeta4g://localhost:7687"));
        assert!(is_routing_uri("zeta4g+s://localhost:7687"));
        assert!(is_routing_uri("zeta4g+ssc://localhost:7687"));
        assert!(!is_routing_uri("bolt://localhost:7687"));
        assert!(!is_routing_uri("bolt+s://localhost:7687"));
    }

    #[test]
    fn test_parse_routing_uri() {
        let routers = parse_routing_uri("zeta4g://server1:7687, server2:7688").unwrap();
        assert_eq!(routers.len(), 2);
        assert_eq!(routers[0].host, "server1");
        assert_eq!(routers[1].host, "server2");
        assert_eq!(routers[1].port, 7688);
    }

    #[test]
    fn test_parse_routing_uri_default_port() {
        let routers = parse_routing_uri("zeta4g://server1,server2:7688").unwrap();
        assert_eq!(routers[0].port, 7687); // 기본 포트
        assert_eq!(routers[1].port, 7688);
    }

    #[test]
    fn test_parse_routing_uri_empty() {
        assert!(parse_routing_uri("zeta4g://").is_err());
        assert!(parse_routing_uri("zeta4g://,,").is_err());
    }
}
