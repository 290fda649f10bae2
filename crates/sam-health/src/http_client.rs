use reqwest::blocking::Client;
use std::sync::OnceLock;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client shared by every request of one gateway.
///
/// Built on first use, which always happens on a blocking thread; the
/// blocking client must not be constructed on an async worker.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedClient {
    cell: OnceLock<Client>,
}

impl SharedClient {
    pub(crate) fn get(&self) -> Result<&Client, reqwest::Error> {
        if let Some(client) = self.cell.get() {
            return Ok(client);
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(self.cell.get_or_init(|| client))
    }
}
