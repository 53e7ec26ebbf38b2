//! 시간 소스
//!
//! 라우터가 테이블 만료를 판단할 때 사용하는 시계입니다.

use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// 현재 시각을 제공하는 시계
pub trait Clock: Send + Sync {
    /// 현재 시각
    fn now(&self) -> Instant;
}

/// 실제 시스템 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 수동으로 움직이는 시계
///
/// 테스트에서 시간을 결정적으로 제어할 때 사용합니다. `with_auto_advance`를
/// 지정하면 `now()`가 호출될 때마다 그만큼 시간이 흐릅니다.
pub struct ManualClock {
    current: Mutex<Instant>,
    auto_advance: Duration,
}

impl ManualClock {
    /// 현재 시각에서 시작하는 시계
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// 지정한 시각에서 시작하는 시계
    pub fn starting_at(start: Instant) -> Self {
        Self {
            current: Mutex::new(start),
            auto_advance: Duration::ZERO,
        }
    }

    /// `now()` 호출마다 흐를 시간 지정
    pub fn with_auto_advance(mut self, step: Duration) -> Self {
        self.auto_advance = step;
        self
    }

    /// 시간 진행
    pub fn advance(&self, by: Duration) {
        *self.current.lock() += by;
    }

    /// 시각 지정
    pub fn set(&self, at: Instant) {
        *self.current.lock() = at;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let mut current = self.current.lock();
        *current += self.auto_advance;
        *current
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock")
            .field("current", &*self.current.lock())
            .field("auto_advance", &self.auto_advance)
            .finish()
    }
}
