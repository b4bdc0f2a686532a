//! User-facing failure notices.

use std::fmt;

use tokio::sync::mpsc;
use tracing::warn;

/// The four failure categories a cart operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    OutOfStock,
    AddProductFailed,
    UpdateAmountFailed,
    RemoveProductFailed,
}

impl NoticeKind {
    pub fn default_message(self) -> &'static str {
        match self {
            NoticeKind::OutOfStock => "requested quantity out of stock",
            NoticeKind::AddProductFailed => "error adding product",
            NoticeKind::UpdateAmountFailed => "error updating product quantity",
            NoticeKind::RemoveProductFailed => "error removing product",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoticeKind::OutOfStock => "out_of_stock",
            NoticeKind::AddProductFailed => "add_product_failed",
            NoticeKind::UpdateAmountFailed => "update_amount_failed",
            NoticeKind::RemoveProductFailed => "remove_product_failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Fire-and-forget receiver of failure notices.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Writes every notice to the log as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        warn!(%kind, "{message}");
    }
}

/// Forwards notices over a channel, e.g. to a UI task.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        // Nobody listening is not an error for a fire-and-forget sink.
        let _ = self.sender.send(Notice {
            kind,
            message: message.to_string(),
        });
    }
}
