//! Driver Error Types
//!
//! 드라이버 에러 정의

use std::fmt;
use std::io;
use thiserror::Error;

// ============================================================================
// DiscoveryTier - 라우팅 테이블 조회 단계
// ============================================================================

/// 라우팅 테이블 조회 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryTier {
    /// 루트 라우터
    RootRouter,
    /// 백업 라우터 목록
    BackupRouters,
}

impl DiscoveryTier {
    /// 단계 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RootRouter => "root router",
            Self::BackupRouters => "backup routers",
        }
    }
}

impl fmt::Display for DiscoveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DriverError - 드라이버 에러
// ============================================================================

/// 드라이버 에러
#[derive(Error, Debug)]
pub enum DriverError {
    /// 연결 에러
    #[error("Connection error: {0}")]
    Connection(String),

    /// 프로토콜 에러
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// 타임아웃 에러
    #[error("Timeout: {0}")]
    Timeout(String),

    /// 풀 에러
    #[error("Pool error: {0}")]
    Pool(String),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 서비스 불가
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 취소됨
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// 라우팅 테이블 조회 실패
    #[error("Routing table discovery failed at {tier}: {source}")]
    Discovery {
        /// 실패한 단계
        tier: DiscoveryTier,
        /// 원인
        source: Box<DriverError>,
    },

    /// I/O 에러
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 내부 에러
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DriverError {
    /// 연결 에러 생성
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// 프로토콜 에러 생성
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// 타임아웃 에러 생성
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// 풀 에러 생성
    pub fn pool(msg: impl Into<String>) -> Self {
        Self::Pool(msg.into())
    }

    /// 설정 에러 생성
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// 서비스 불가 에러 생성
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    /// 취소 에러 생성
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// 조회 단계 정보를 붙인 에러 생성
    pub fn discovery(tier: DiscoveryTier, source: DriverError) -> Self {
        Self::Discovery {
            tier,
            source: Box::new(source),
        }
    }

    /// 내부 에러 생성
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 실패한 조회 단계 (조회 에러인 경우)
    pub fn discovery_tier(&self) -> Option<DiscoveryTier> {
        match self {
            Self::Discovery { tier, .. } => Some(*tier),
            _ => None,
        }
    }

    /// 재시도 가능 여부
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) | Self::ServiceUnavailable(_) | Self::Io(_) => true,
            Self::Discovery { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// 클라이언트 에러 여부
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Discovery { source, .. } => source.is_client_error(),
            _ => false,
        }
    }
}

// ============================================================================
// Result Type
// ============================================================================

/// 드라이버 결과 타입
pub type DriverResult<T> = Result<T, DriverError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_driver_error_creation() {
        let err = DriverError::connection("Connection refused");
        assert!(matches!(err, DriverError::Connection(_)));

        let err = DriverError::pool("Pool is closed");
        assert!(matches!(err, DriverError::Pool(_)));

        let err = DriverError::discovery(DiscoveryTier::RootRouter, DriverError::timeout("slow"));
        assert_eq!(err.discovery_tier(), Some(DiscoveryTier::RootRouter));
    }

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::connection("Connection refused");
        assert_eq!(err.to_string(), "Connection error: Connection refused");

        let err = DriverError::discovery(
            DiscoveryTier::BackupRouters,
            DriverError::service_unavailable("no candidates"),
        );
        assert_eq!(
            err.to_string(),
            "Routing table discovery failed at backup routers: Service unavailable: no candidates"
        );
    }

    #[test]
    fn test_discovery_error_source() {
        let err = DriverError::discovery(DiscoveryTier::RootRouter, DriverError::connection("refused"));
        let source = err.source().expect("discovery error should carry its cause");
        assert_eq!(source.to_string(), "Connection error: refused");
    }

    #[test]
    fn test_driver_error_retryable() {
        assert!(DriverError::connection("Connection refused").is_retryable());
        assert!(DriverError::timeout("Operation timed out").is_retryable());
        assert!(!DriverError::configuration("Invalid URI").is_retryable());
        assert!(!DriverError::cancelled("borrow abandoned").is_retryable());

        let err = DriverError::discovery(DiscoveryTier::BackupRouters, DriverError::connection("refused"));
        assert!(err.is_retryable());

        let err = DriverError::discovery(DiscoveryTier::BackupRouters, DriverError::protocol("bad reply"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_driver_error_client_error() {
        assert!(DriverError::configuration("Invalid URI").is_client_error());
        assert!(!DriverError::connection("Connection refused").is_client_error());

        let err = DriverError::discovery(DiscoveryTier::RootRouter, DriverError::configuration("bad"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err: DriverError = io_err.into();
        assert!(matches!(err, DriverError::Io(_)));
        assert!(err.is_retryable());
    }
}
