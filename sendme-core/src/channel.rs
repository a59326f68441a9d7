use std::sync::Mutex;

/// Outbound messaging channel for submitted orders.
///
/// The engine builds one deep link per order and hands it off. The handoff
/// is fire-and-forget: the engine never learns whether the messaging app
/// actually delivered the text.
pub trait MessageChannel: Send + Sync {
    /// Build the deep link carrying `message` as its percent-encoded text
    fn link_for(&self, message: &str) -> String;

    /// Open the link in a new browsing context
    fn dispatch(&self, url: &str);
}

type Opener = Box<dyn Fn(&str) + Send + Sync>;

/// `<base_url>/<recipient>?text=<percent-encoded message>`
pub struct DeepLinkChannel {
    base_url: String,
    recipient: String,
    opener: Opener,
}

impl DeepLinkChannel {
    pub fn new(base_url: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            recipient: recipient.into(),
            opener: Box::new(|url| {
                tracing::info!(url_len = url.len(), "Deep link ready for host to open");
            }),
        }
    }

    /// Replace the default opener (which only logs) with the host's own
    pub fn with_opener<F>(mut self, opener: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.opener = Box::new(opener);
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

impl MessageChannel for DeepLinkChannel {
    fn link_for(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            self.recipient,
            urlencoding::encode(message)
        )
    }

    fn dispatch(&self, url: &str) {
        (self.opener)(url);
    }
}

/// Channel that keeps every dispatched link in memory
pub struct RecordingChannel {
    inner: DeepLinkChannel,
    dispatched: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn new(base_url: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            inner: DeepLinkChannel::new(base_url, recipient),
            dispatched: Mutex::new(Vec::new()),
        }
    }

    /// Links dispatched so far, oldest first
    pub fn dispatched(&self) -> Vec<String> {
        self.dispatched
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

impl MessageChannel for RecordingChannel {
    fn link_for(&self, message: &str) -> String {
        self.inner.link_for(message)
    }

    fn dispatch(&self, url: &str) {
        if let Ok(mut urls) = self.dispatched.lock() {
            urls.push(url.to_string());
        }
    }
}
