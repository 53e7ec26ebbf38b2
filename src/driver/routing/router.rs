//! 라우터
//!
//! 라우팅 테이블을 캐시하고, 만료되면 루트 라우터(실패 시 백업 라우터)에서
//! 새 테이블을 받아 교체합니다. 모든 클러스터 작업 전에 호출되므로 여러
//! 스레드에서 동시에 사용할 수 있어야 합니다.
//!
//! # 갱신 절차
//!
//! ```text
//! readers() / writers()
//!   └── ensure_fresh_table()
//!         ├── 캐시 적중 → 그대로 반환
//!         └── 만료 → refresh 락 획득 → 재확인
//!               ├── borrow([root])          → fetch_routing_table()
//!               └── 실패 시 borrow(backup()) → fetch_routing_table()
//! ```

use std::fmt;
use std::slice;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use super::config::{RouterConfig, RoutingContext};
use super::table::RoutingTable;
use crate::driver::error::{DiscoveryTier, DriverError, DriverResult};
use crate::driver::pool::{BorrowedConnection, ConnectionPool};
use crate::driver::ServerAddress;

/// 백업 라우터 목록을 제공하는 콜백
pub type BackupRouters = Arc<dyn Fn() -> Vec<ServerAddress> + Send + Sync>;

/// 캐시된 테이블과 받은 시각
///
/// 항상 한 값으로 교체되므로 테이블과 시각이 어긋나지 않습니다.
#[derive(Clone)]
struct CachedTable {
    table: Arc<RoutingTable>,
    fetched_at: Instant,
}

/// 라우터
pub struct Router {
    /// 루트 라우터 주소
    root_router: ServerAddress,
    /// 백업 라우터 콜백
    backup_routers: BackupRouters,
    /// ROUTE 요청에 전달할 컨텍스트
    routing_context: Option<RoutingContext>,
    /// 연결 풀
    pool: Arc<dyn ConnectionPool>,
    /// 시계
    clock: Arc<dyn Clock>,
    /// 캐시된 테이블
    cached: RwLock<Option<CachedTable>>,
    /// 동시 갱신 합치기
    refresh_lock: tokio::sync::Mutex<()>,
}

impl Router {
    /// 새 라우터 생성
    ///
    /// `backup_routers`는 루트 라우터에서 테이블을 받지 못했을 때만 호출됩니다.
    pub fn new<F>(
        root_router: ServerAddress,
        backup_routers: F,
        routing_context: Option<RoutingContext>,
        pool: Arc<dyn ConnectionPool>,
    ) -> Self
    where
        F: Fn() -> Vec<ServerAddress> + Send + Sync + 'static,
    {
        Self {
            root_router,
            backup_routers: Arc::new(backup_routers),
            routing_context,
            pool,
            clock: Arc::new(SystemClock),
            cached: RwLock::new(None),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// 설정으로 라우터 생성
    pub fn with_config<F>(config: RouterConfig, backup_routers: F, pool: Arc<dyn ConnectionPool>) -> Self
    where
        F: Fn() -> Vec<ServerAddress> + Send + Sync + 'static,
    {
        Self::new(config.root_router, backup_routers, config.routing_context, pool)
    }

    /// 시계 교체
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 루트 라우터 주소
    pub fn root_router(&self) -> &ServerAddress {
        &self.root_router
    }

    /// 읽기 서버 목록
    ///
    /// 테이블이 만료되었으면 먼저 갱신합니다. 갱신에 실패하면 에러를 반환합니다.
    pub async fn readers(&self) -> DriverResult<Vec<ServerAddress>> {
        let table = self.ensure_fresh_table().await?;
        Ok(table.readers().to_vec())
    }

    /// 쓰기 서버 목록
    pub async fn writers(&self) -> DriverResult<Vec<ServerAddress>> {
        let table = self.ensure_fresh_table().await?;
        Ok(table.writers().to_vec())
    }

    /// 최신 라우팅 테이블
    pub async fn routing_table(&self) -> DriverResult<Arc<RoutingTable>> {
        self.ensure_fresh_table().await
    }

    /// 현재 캐시된 테이블 (만료 여부와 무관, 갱신하지 않음)
    pub fn cached_table(&self) -> Option<Arc<RoutingTable>> {
        self.cached.read().as_ref().map(|cached| cached.table.clone())
    }

    /// 캐시된 테이블 폐기
    ///
    /// 다음 접근 시 새 테이블을 조회합니다.
    pub fn invalidate(&self) {
        *self.cached.write() = None;
    }

    fn fresh_cached_table(&self) -> Option<Arc<RoutingTable>> {
        let cached = self.cached.read().clone()?;
        let now = self.clock.now();
        if cached.table.is_stale(now, cached.fetched_at) {
            None
        } else {
            Some(cached.table)
        }
    }

    async fn ensure_fresh_table(&self) -> DriverResult<Arc<RoutingTable>> {
        if let Some(table) = self.fresh_cached_table() {
            return Ok(table);
        }

        let _refresh = self.refresh_lock.lock().await;

        // 기다리는 동안 다른 호출자가 갱신했을 수 있음
        if let Some(table) = self.fresh_cached_table() {
            return Ok(table);
        }

        let table = Arc::new(self.discover().await?);
        let fetched_at = self.clock.now();

        debug!(
            router = %self.root_router,
            readers = table.readers().len(),
            writers = table.writers().len(),
            ttl_secs = table.time_to_live().as_secs(),
            "Installed new routing table"
        );

        *self.cached.write() = Some(CachedTable {
            table: table.clone(),
            fetched_at,
        });

        Ok(table)
    }

    /// 루트 라우터, 실패 시 백업 라우터에서 테이블 조회
    ///
    /// 백업 목록은 비어 있더라도 그대로 풀에 전달하며, 목록 안의 순서대로
    /// 시도하는 것은 풀의 몫입니다.
    async fn discover(&self) -> DriverResult<RoutingTable> {
        debug!(router = %self.root_router, "Refreshing routing table");

        let root_err = match self.fetch_from(slice::from_ref(&self.root_router)).await {
            Ok(table) => return Ok(table),
            Err(err) => err,
        };
        warn!(
            router = %self.root_router,
            error = %root_err,
            "Failed to fetch routing table from root router"
        );

        let backups = (self.backup_routers)();
        self.fetch_from(&backups).await.map_err(|err| {
            warn!(
                candidates = ?backups,
                error = %err,
                "Failed to fetch routing table from backup routers"
            );
            DriverError::discovery(DiscoveryTier::BackupRouters, err)
        })
    }

    /// 후보 목록으로 연결을 빌려 테이블 조회
    ///
    /// 이 단계를 벗어나면 (호출자가 future를 버린 경우 포함) 토큰이 취소됩니다.
    async fn fetch_from(&self, candidates: &[ServerAddress]) -> DriverResult<RoutingTable> {
        let cancel = CancellationToken::new();
        let _cancel_on_exit = cancel.clone().drop_guard();

        let mut conn = BorrowedConnection::borrow(self.pool.as_ref(), candidates, cancel).await?;
        conn.fetch_routing_table(self.routing_context.as_ref()).await
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.cached.read();
        f.debug_struct("Router")
            .field("root_router", &self.root_router)
            .field("routing_context", &self.routing_context)
            .field("cached_table", &cached.as_ref().map(|c| &c.table))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
