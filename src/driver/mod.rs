//! Driver Module
//!
//! 클러스터 라우팅에 필요한 드라이버 구성 요소
//!
//! - 서버 주소와 라우팅 URI 파싱 ([`ServerAddress`])
//! - 에러 타입 ([`DriverError`], [`DriverResult`])
//! - 연결 풀 경계 ([`ConnectionPool`], [`Connection`])
//! - 라우팅 테이블 캐시 ([`routing::Router`])

pub mod routing;
mod address;
mod error;
mod pool;

// Re-exports
pub use address::{is_routing_uri, parse_routing_uri, ServerAddress, DEFAULT_PORT};
pub use error::{DiscoveryTier, DriverError, DriverResult};
pub use pool::{BorrowedConnection, Connection, ConnectionPool};
