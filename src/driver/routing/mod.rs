//! 라우팅 모듈
//!
//! 클러스터 환경에서 라우팅 테이블을 캐시하고 갱신합니다.
//!
//! # 개요
//!
//! [`Router`]는 루트 라우터에서 라우팅 테이블을 받아 TTL 동안 캐시합니다.
//! 루트 라우터에 연결할 수 없으면 콜백이 제공하는 백업 라우터 목록을 사용합니다.
//!
//! # 예시
//!
//! ```ignore
//! use std::sync::Arc;
//! use zeta4g_routing::driver::routing::{Router, RouterConfig};
//!
//! let config = RouterConfig::builder("zeta4g://core1:7687")?
//!     .with_routing_context("region", "eu-west")
//!     .build();
//!
//! let router = Router::with_config(config, || known_routers(), pool);
//!
//! // 읽기 서버 목록 (필요하면 테이블 갱신)
//! let readers = router.readers().await?;
//! let writers = router.writers().await?;
//! ```

mod clock;
mod config;
mod router;
mod table;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{RouterConfig, RouterConfigBuilder, RoutingContext};
pub use router::{BackupRouters, Router};
pub use table::{RoutingTable, RoutingTableBuilder, ServerRole};
