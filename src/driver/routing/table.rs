//! 라우팅 테이블
//!
//! 클러스터의 서버 역할별 목록 스냅샷입니다. 한 번 만들어진 테이블은 변경되지
//! 않으며, 갱신은 항상 새 테이블을 설치하는 방식으로 이루어집니다.

use std::time::{Duration, Instant};

use crate::driver::ServerAddress;

/// 서버 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerRole {
    /// 라우팅 테이블 제공자
    Route,
    /// 쓰기 트랜잭션 처리 (리더)
    Write,
    /// 읽기 트랜잭션 처리 (팔로워)
    Read,
}

impl ServerRole {
    /// 문자열에서 역할 파싱
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ROUTE" => Some(Self::Route),
            "WRITE" => Some(Self::Write),
            "READ" => Some(Self::Read),
            _ => None,
        }
    }

    /// 역할을 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Route => "ROUTE",
            Self::Write => "WRITE",
            Self::Read => "READ",
        }
    }
}

/// 라우팅 테이블
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    readers: Vec<ServerAddress>,
    writers: Vec<ServerAddress>,
    routers: Vec<ServerAddress>,
    time_to_live: Duration,
}

impl RoutingTable {
    /// 새 라우팅 테이블 생성
    ///
    /// 주소 순서는 그대로 유지됩니다.
    pub fn new(readers: Vec<ServerAddress>, writers: Vec<ServerAddress>, time_to_live: Duration) -> Self {
        Self {
            readers,
            writers,
            routers: Vec::new(),
            time_to_live,
        }
    }

    /// 라우터 목록 지정
    pub fn with_routers(mut self, routers: Vec<ServerAddress>) -> Self {
        self.routers = routers;
        self
    }

    /// 역할별로 서버를 모으는 빌더
    pub fn builder(time_to_live: Duration) -> RoutingTableBuilder {
        RoutingTableBuilder {
            table: Self::new(Vec::new(), Vec::new(), time_to_live),
        }
    }

    /// 리더 목록 (읽기 트랜잭션용)
    pub fn readers(&self) -> &[ServerAddress] {
        &self.readers
    }

    /// 라이터 목록 (쓰기 트랜잭션용)
    pub fn writers(&self) -> &[ServerAddress] {
        &self.writers
    }

    /// 라우터 목록 (라우팅 테이블 조회용)
    pub fn routers(&self) -> &[ServerAddress] {
        &self.routers
    }

    /// 유효 기간
    pub fn time_to_live(&self) -> Duration {
        self.time_to_live
    }

    /// `fetched_at`에 받은 테이블이 `now` 시점에 만료되었는지 확인
    ///
    /// TTL이 0이면 항상 만료 상태입니다.
    pub fn is_stale(&self, now: Instant, fetched_at: Instant) -> bool {
        match fetched_at.checked_add(self.time_to_live) {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    /// 쓰기 가능한 서버가 있는지 확인
    pub fn has_writers(&self) -> bool {
        !self.writers.is_empty()
    }

    /// 읽기 가능한 서버가 있는지 확인
    pub fn has_readers(&self) -> bool {
        !self.readers.is_empty()
    }
}

/// 라우팅 테이블 빌더
///
/// ROUTE 응답처럼 역할이 붙은 서버 목록을 받아 테이블을 만듭니다.
/// 같은 역할 안의 중복 주소는 처음 나온 것만 남깁니다.
#[derive(Debug, Clone)]
pub struct RoutingTableBuilder {
    table: RoutingTable,
}

impl RoutingTableBuilder {
    /// 역할별 서버 추가
    pub fn add_server(mut self, role: ServerRole, address: ServerAddress) -> Self {
        let servers = match role {
            ServerRole::Route => &mut self.table.routers,
            ServerRole::Write => &mut self.table.writers,
            ServerRole::Read => &mut self.table.readers,
        };
        if !servers.contains(&address) {
            servers.push(address);
        }
        self
    }

    /// 같은 역할의 서버 여러 개 추가
    pub fn add_servers(
        self,
        role: ServerRole,
        addresses: impl IntoIterator<Item = ServerAddress>,
    ) -> Self {
        addresses
            .into_iter()
            .fold(self, |builder, address| builder.add_server(role, address))
    }

    /// 테이블 빌드
    pub fn build(self) -> RoutingTable {
        self.table
    }
}
