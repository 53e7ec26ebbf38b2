//! Connection Pool 경계
//!
//! 라우터가 사용하는 연결 풀과 연결의 인터페이스입니다. 실제 소켓 연결,
//! 핸드셰이크, ROUTE 메시지 처리는 이 트레이트의 구현체가 담당합니다.

use std::fmt;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::address::ServerAddress;
use super::error::{DriverError, DriverResult};
use super::routing::{RoutingContext, RoutingTable};

// ============================================================================
// Connection - 연결
// ============================================================================

/// 풀에서 빌린 연결
#[async_trait]
pub trait Connection: Send {
    /// 연결된 서버 주소
    fn server_address(&self) -> &ServerAddress;

    /// 연결된 서버에서 새 라우팅 테이블 조회
    ///
    /// `context`는 호출자가 전달한 라우팅 컨텍스트이며 그대로 서버에 전달됩니다.
    async fn fetch_routing_table(
        &mut self,
        context: Option<&RoutingContext>,
    ) -> DriverResult<RoutingTable>;
}

// ============================================================================
// ConnectionPool - 연결 풀
// ============================================================================

/// 연결 풀
///
/// `borrow`는 후보 주소를 주어진 순서대로 시도하여 처음 성공한 연결을 반환하고,
/// 모두 실패하면 실패 내용을 요약한 에러를 반환합니다. `cancel`이 취소되면
/// 진행 중인 연결 시도를 즉시 중단해야 합니다.
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    /// 후보 주소 중 하나에 대한 연결 획득
    async fn borrow(
        &self,
        candidates: &[ServerAddress],
        cancel: CancellationToken,
    ) -> DriverResult<Box<dyn Connection>>;

    /// 연결 반환
    fn return_connection(&self, conn: Box<dyn Connection>);
}

// ============================================================================
// BorrowedConnection - 범위 기반 연결
// ============================================================================

/// 범위를 벗어나면 풀로 자동 반환되는 연결
pub struct BorrowedConnection<'a> {
    pool: &'a dyn ConnectionPool,
    conn: Option<Box<dyn Connection>>,
}

impl<'a> BorrowedConnection<'a> {
    /// 풀에서 연결을 빌려 감싸기
    pub async fn borrow(
        pool: &'a dyn ConnectionPool,
        candidates: &[ServerAddress],
        cancel: CancellationToken,
    ) -> DriverResult<BorrowedConnection<'a>> {
        let conn = pool.borrow(candidates, cancel).await?;
        Ok(Self {
            pool,
            conn: Some(conn),
        })
    }

    /// 연결된 서버 주소
    pub fn server_address(&self) -> Option<&ServerAddress> {
        self.conn.as_ref().map(|conn| conn.server_address())
    }

    /// 연결에서 라우팅 테이블 조회
    pub async fn fetch_routing_table(
        &mut self,
        context: Option<&RoutingContext>,
    ) -> DriverResult<RoutingTable> {
        match self.conn.as_mut() {
            Some(conn) => conn.fetch_routing_table(context).await,
            None => Err(DriverError::internal("Connection already returned to pool")),
        }
    }
}

impl fmt::Debug for BorrowedConnection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BorrowedConnection")
            .field("address", &self.server_address())
            .finish()
    }
}

impl Drop for BorrowedConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.return_connection(conn);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;

    struct FakeConnection {
        address: ServerAddress,
        fail: bool,
    }

    #[async_trait]
    impl Connection for FakeConnection {
        fn server_address(&self) -> &ServerAddress {
            &self.address
        }

        async fn fetch_routing_table(
            &mut self,
            _context: Option<&RoutingContext>,
        ) -> DriverResult<RoutingTable> {
            if self.fail {
                return Err(DriverError::protocol("ROUTE failed"));
            }
            Ok(RoutingTable::new(
                vec![self.address.clone()],
                vec![],
                Duration::from_secs(10),
            ))
        }
    }

    #[derive(Default)]
    struct FakePool {
        fail_fetch: bool,
        returned: Mutex<Vec<ServerAddress>>,
    }

    #[async_trait]
    impl ConnectionPool for FakePool {
        async fn borrow(
            &self,
            candidates: &[ServerAddress],
            _cancel: CancellationToken,
        ) -> DriverResult<Box<dyn Connection>> {
            let address = candidates
                .first()
                .cloned()
                .ok_or_else(|| DriverError::service_unavailable("no candidates"))?;
            Ok(Box::new(FakeConnection {
                address,
                fail: self.fail_fetch,
            }))
        }

        fn return_connection(&self, conn: Box<dyn Connection>) {
            self.returned.lock().push(conn.server_address().clone());
        }
    }

    #[tokio::test]
    async fn test_borrowed_connection_returns_on_drop() {
        let pool = FakePool::default();
        let candidates = vec![ServerAddress::new("router", 7687)];

        {
            let mut conn = BorrowedConnection::borrow(&pool, &candidates, CancellationToken::new())
                .await
                .unwrap();
            assert_eq!(conn.server_address(), Some(&candidates[0]));
            let table = conn.fetch_routing_table(None).await.unwrap();
            assert_eq!(table.readers(), candidates.as_slice());
            assert!(pool.returned.lock().is_empty());
        }

        assert_eq!(*pool.returned.lock(), candidates);
    }

    #[tokio::test]
    async fn test_borrowed_connection_returns_after_fetch_failure() {
        let pool = FakePool {
            fail_fetch: true,
            ..Default::default()
        };
        let candidates = vec![ServerAddress::new("router", 7687)];

        let result = async {
            let mut conn =
                BorrowedConnection::borrow(&pool, &candidates, CancellationToken::new()).await?;
            conn.fetch_routing_table(None).await
        }
        .await;

        assert!(matches!(result, Err(DriverError::Protocol(_))));
        assert_eq!(pool.returned.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_borrow_failure_returns_nothing() {
        let pool = FakePool::default();
        let result = BorrowedConnection::borrow(&pool, &[], CancellationToken::new()).await;

        assert!(matches!(result, Err(DriverError::ServiceUnavailable(_))));
        assert!(pool.returned.lock().is_empty());
    }
}
