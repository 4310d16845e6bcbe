use mri_classify_common::{Notification, NotificationVariant};
use std::sync::Arc;

/// 通知の受け手
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

/// 端末に表示する通知
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.variant {
            NotificationVariant::Default => {
                println!("✔ {}: {}", notification.title, notification.description);
            }
            NotificationVariant::Destructive => {
                eprintln!("✖ {}: {}", notification.title, notification.description);
            }
        }
    }
}
