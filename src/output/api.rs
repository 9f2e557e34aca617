use std::fmt::Debug;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::debug;

use super::event::OutputEvent;
use super::model::SessionOutput;
use super::store::OutputStore;
use crate::Result;

/// 每次添加都会覆盖而不是累积输出的会话
pub const PLAYGROUND_SESSION_ID: &str = "playground";
pub const DEFAULT_MAX_OUTPUTS: usize = 10;
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// 输出变更通知的订阅句柄，drop 即取消订阅
pub type Subscription = broadcast::Receiver<OutputEvent>;

#[derive(Debug)]
struct OutputBus {
    tx: broadcast::Sender<OutputEvent>,
}

impl Default for OutputBus {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl OutputBus {
    fn subscribe(&self) -> Subscription {
        self.tx.subscribe()
    }

    fn publish(&self, event: OutputEvent) {
        // 没有订阅者时 send() 返回错误
        if self.tx.send(event).is_err() {
            debug!("No output subscribers");
        }
    }
}

/// 按会话保存的输出历史，变更时广播通知
#[derive(Clone)]
pub struct OutputApi {
    store: Arc<dyn OutputStore>,
    bus: Arc<OutputBus>,
    max_outputs: usize,
}

impl Debug for OutputApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputApi")
            .field("max_outputs", &self.max_outputs)
            .finish_non_exhaustive()
    }
}

impl OutputApi {
    pub fn new(store: Arc<dyn OutputStore>) -> Self {
        Self::with_capacity(store, DEFAULT_MAX_OUTPUTS)
    }

    /// `max_outputs` 至少为 1
    pub fn with_capacity(store: Arc<dyn OutputStore>, max_outputs: usize) -> Self {
        Self {
            store,
            bus: Arc::new(OutputBus::default()),
            max_outputs: max_outputs.max(1),
        }
    }

    pub fn max_outputs(&self) -> usize {
        self.max_outputs
    }

    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    /// 记录一条会话输出，返回实际保存的记录
    ///
    /// playground 会话以及尚无记录的会话只保留这一条；其他会话中相同 ID
    /// 的输出原地替换，否则追加到末尾并按容量淘汰最旧的记录。
    /// `mock` 输出不打时间戳。读改写在存储的同一把锁内完成。
    pub fn add_output(
        &self,
        session_id: &str,
        output: SessionOutput,
        mock: bool,
    ) -> Result<SessionOutput> {
        let mut output = output;
        if !mock {
            output.created_at = Some(Utc::now());
        }

        let stored = output.clone();
        let max_outputs = self.max_outputs;
        let keep_history = session_id != PLAYGROUND_SESSION_ID;

        self.store.update(
            session_id,
            Box::new(move |current: Option<Vec<SessionOutput>>| match current {
                Some(mut outputs) if keep_history => {
                    if let Some(existing) = outputs.iter_mut().find(|o| o.id == output.id) {
                        *existing = output;
                    } else {
                        outputs.push(output);
                        let overflow = outputs.len().saturating_sub(max_outputs);
                        outputs.drain(..overflow);
                    }
                    outputs
                }
                _ => vec![output],
            }),
        )?;

        self.bus.publish(OutputEvent::Refreshed {
            session_id: session_id.to_string(),
        });
        Ok(stored)
    }

    pub fn clear_output(&self, session_id: &str) -> Result<()> {
        self.store.delete(session_id)?;
        self.bus.publish(OutputEvent::Cleared {
            session_id: session_id.to_string(),
        });
        Ok(())
    }

    /// 通知订阅者展示指定的输出
    pub fn set_output(&self, session_id: &str, output_id: &str) {
        self.bus.publish(OutputEvent::Selected {
            session_id: session_id.to_string(),
            output_id: output_id.to_string(),
        });
    }

    /// 会话中的输出，最新在前
    pub fn outputs(&self, session_id: &str) -> Result<Vec<SessionOutput>> {
        let mut outputs = self.store.get(session_id)?.unwrap_or_default();
        outputs.reverse();
        Ok(outputs)
    }

    /// 当前应展示的输出：优先选中的输出，其次最新的一条，
    /// 都没有时返回 void 输出
    pub fn current_output(
        &self,
        session_id: &str,
        selected: Option<&str>,
    ) -> Result<SessionOutput> {
        let outputs = self.outputs(session_id)?;
        let current = match selected {
            Some(output_id) => outputs.into_iter().find(|o| o.id == output_id),
            None => outputs.into_iter().next(),
        };
        Ok(current.unwrap_or_else(SessionOutput::void))
    }

    pub fn sessions(&self) -> Result<Vec<String>> {
        self.store.sessions()
    }
}
