use crate::core::{CartLine, DimensionNotice, NotificationChannel, NoticeSeverity};
use crate::utils::error::Result;
use chrono::Utc;

pub const NOTICE_TITLE: &str = "Product missing dimensions";
const NOTICE_HEADER: &str = "The following products do not have dimension set:";
const NOTICE_FOOTER: &str =
    "<small>Disable these notifications in System > Settings > Carriers > Intelipost</small>";

/// Tells the store operator which products block quoting.
pub struct DimensionNotifier<N: NotificationChannel> {
    channel: N,
    product_edit_url: String,
}

impl<N: NotificationChannel> DimensionNotifier<N> {
    /// `product_edit_url` may contain an `{id}` placeholder for the product id.
    pub fn new(channel: N, product_edit_url: impl Into<String>) -> Self {
        Self {
            channel,
            product_edit_url: product_edit_url.into(),
        }
    }

    pub fn channel(&self) -> &N {
        &self.channel
    }

    /// Publishes one notice for `lines`. Delivery failures are logged only.
    pub fn notify(&self, lines: &[CartLine]) {
        if lines.is_empty() {
            return;
        }

        let notice = self.compose(lines);
        match self.channel.publish(&notice) {
            Ok(()) => tracing::info!(
                products = notice.product_ids.len(),
                "📨 Missing-dimension notice published"
            ),
            Err(e) => tracing::warn!("Failed to publish missing-dimension notice: {}", e),
        }
    }

    pub fn compose(&self, lines: &[CartLine]) -> DimensionNotice {
        let mut message = String::from(NOTICE_HEADER);
        message.push_str("<ul>");
        for line in lines {
            message.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                self.edit_url_for(line.product_id),
                line.name
            ));
        }
        message.push_str("</ul>");
        message.push_str(NOTICE_FOOTER);

        DimensionNotice {
            severity: NoticeSeverity::Minor,
            title: NOTICE_TITLE.to_string(),
            message,
            product_ids: lines.iter().map(|l| l.product_id).collect(),
            created_at: Utc::now(),
        }
    }

    fn edit_url_for(&self, product_id: u64) -> String {
        self.product_edit_url.replace("{id}", &product_id.to_string())
    }
}

/// Writes notices to the log instead of an admin inbox.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogChannel;

impl NotificationChannel for LogChannel {
    fn publish(&self, notice: &DimensionNotice) -> Result<()> {
        tracing::warn!(
            severity = ?notice.severity,
            products = ?notice.product_ids,
            "{}: {}",
            notice.title,
            notice.message
        );
        Ok(())
    }
}
