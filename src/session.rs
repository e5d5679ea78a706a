//! 查询会话跟踪
//!
//! 每次 `log_query` 调用分配一个严格递增的序号和合成 id（`q1`、`q2`…），
//! 并记录一条元数据。元数据不参与任何输出，只按 TTL 和容量淘汰，
//! 保证内存有界。计数器与映射由同一把锁保护，一次 `begin` 是原子的。

use crate::statement::StatementKind;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// 默认元数据存活时间（毫秒）
pub const DEFAULT_TTL_MS: u64 = 5000;
/// 默认最多保留的元数据条数
pub const DEFAULT_CAPACITY: usize = 1024;

/// 单次查询的元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStats {
    pub id: String,
    pub seq: u64,
    pub started_at: Instant,
    pub kind: StatementKind,
    pub table: Option<String>,
}

/// `begin` 返回的序号与合成 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub seq: u64,
    pub id: String,
}

#[derive(Debug, Default)]
struct SessionState {
    count: u64,
    active: HashMap<String, QueryStats>,
}

/// 会话跟踪器
#[derive(Debug)]
pub struct SessionTracker {
    state: Mutex<SessionState>,
    ttl: Duration,
    capacity: usize,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::with_limits(Duration::from_millis(DEFAULT_TTL_MS), DEFAULT_CAPACITY)
    }

    /// 指定 TTL 与容量；容量至少为 1
    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // 锁中毒时沿用内部状态，计数器仍然有效
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 登记一次查询，返回新的序号与合成 id
    pub fn begin(&self, kind: StatementKind, table: Option<String>) -> QueryTicket {
        let now = Instant::now();
        let mut state = self.lock();

        state.count += 1;
        let seq = state.count;
        let id = format!("q{seq}");

        Self::evict_expired(&mut state, now, self.ttl);
        while state.active.len() >= self.capacity {
            Self::evict_oldest(&mut state);
        }

        state.active.insert(
            id.clone(),
            QueryStats { id: id.clone(), seq, started_at: now, kind, table },
        );

        QueryTicket { seq, id }
    }

    /// 清理过期元数据，返回清理条数
    pub fn sweep(&self) -> usize {
        let mut state = self.lock();
        Self::evict_expired(&mut state, Instant::now(), self.ttl)
    }

    /// 最近一次分配的序号
    pub fn count(&self) -> u64 {
        self.lock().count
    }

    /// 当前保留的元数据条数
    pub fn active(&self) -> usize {
        self.lock().active.len()
    }

    fn evict_expired(state: &mut SessionState, now: Instant, ttl: Duration) -> usize {
        let before = state.active.len();
        state
            .active
            .retain(|_, stats| now.saturating_duration_since(stats.started_at) < ttl);
        let removed = before - state.active.len();

        #[cfg(feature = "logging")]
        if removed > 0 {
            tracing::debug!(removed, remaining = state.active.len(), "清理过期查询元数据");
        }

        removed
    }

    fn evict_oldest(state: &mut SessionState) {
        let oldest = state
            .active
            .values()
            .min_by_key(|stats| stats.seq)
            .map(|stats| stats.id.clone());
        if let Some(id) = oldest {
            state.active.remove(&id);
            #[cfg(feature = "logging")]
            tracing::debug!(id = %id, "容量已满，淘汰最早的查询元数据");
        }
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
