/// 广播给输出订阅者的变更通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// 会话输出被添加或替换
    Refreshed { session_id: String },
    /// 选中了某条输出用于展示
    Selected {
        session_id: String,
        output_id: String,
    },
    /// 会话的全部输出已清空
    Cleared { session_id: String },
}

impl OutputEvent {
    pub fn session_id(&self) -> &str {
        match self {
            OutputEvent::Refreshed { session_id }
            | OutputEvent::Selected { session_id, .. }
            | OutputEvent::Cleared { session_id } => session_id,
        }
    }
}
