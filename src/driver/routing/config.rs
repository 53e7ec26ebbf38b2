//! 라우터 설정

use std::collections::HashMap;

use crate::driver::error::{DriverError, DriverResult};
use crate::driver::{is_routing_uri, parse_routing_uri, ServerAddress};

/// 라우팅 컨텍스트
///
/// ROUTE 요청과 함께 서버로 전달되는 키/값 목록입니다. 라우터는 내용을 해석하지 않습니다.
pub type RoutingContext = HashMap<String, String>;

/// 라우터 설정
///
/// | 필드 | 기본값 | 설명 |
/// |------|--------|------|
/// | `root_router` | localhost:7687 | 루트 라우터 주소 |
/// | `seed_routers` | 없음 | URI에 함께 적힌 나머지 라우터 (백업 목록 후보) |
/// | `routing_context` | 없음 | ROUTE 요청에 전달할 컨텍스트 |
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// 루트 라우터 주소
    pub root_router: ServerAddress,
    /// 루트 라우터 뒤에 나열된 시드 라우터
    pub seed_routers: Vec<ServerAddress>,
    /// 라우팅 컨텍스트
    pub routing_context: Option<RoutingContext>,
}

impl RouterConfig {
    /// 루트 라우터로 설정 생성
    pub fn new(root_router: ServerAddress) -> Self {
        Self {
            root_router,
            seed_routers: Vec::new(),
            routing_context: None,
        }
    }

    /// URI로 빌더 시작
    ///
    /// `zeta4g://host1:port1,host2:port2` 형식을 받으며 포트가 없으면 7687을 사용합니다.
    /// 첫 주소가 루트 라우터, 나머지는 시드 라우터가 됩니다. 스킴 없는 주소도 받지만
    /// `bolt://` 같은 직접 연결 스킴은 거부합니다.
    pub fn builder(uri: &str) -> DriverResult<RouterConfigBuilder> {
        if uri.contains("://") && !is_routing_uri(uri) {
            return Err(DriverError::configuration(format!(
                "Routing requires a zeta4g:// URI, got '{}'",
                uri
            )));
        }

        let mut routers = parse_routing_uri(uri)?.into_iter();
        let root_router = routers
            .next()
            .ok_or_else(|| DriverError::configuration("No routers specified"))?;

        let mut config = Self::new(root_router);
        config.seed_routers = routers.collect();
        Ok(RouterConfigBuilder { config })
    }
}

/// 라우터 설정 빌더
#[derive(Debug, Clone)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
    /// 라우팅 컨텍스트 항목 추가
    pub fn with_routing_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .routing_context
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// 라우팅 컨텍스트 전체 지정
    pub fn with_routing_context_map(mut self, context: RoutingContext) -> Self {
        self.config.routing_context = Some(context);
        self
    }

    /// 설정 빌드
    pub fn build(self) -> RouterConfig {
        self.config
    }
}
