use tokio::sync::watch;

/// Barrier that resolves once the page's webfonts have finished loading.
///
/// Typography sampling must not run before fonts settle, or computed font
/// families still show fallbacks. Snapshots captured after the fact use
/// [`FontsBarrier::ready`]; live providers create a pending barrier and
/// signal it from their `document.fonts.ready` equivalent.
#[derive(Debug, Clone, Default)]
pub struct FontsBarrier(Option<watch::Receiver<bool>>);

impl FontsBarrier {
    /// A barrier that is already open.
    #[must_use]
    pub fn ready() -> Self {
        Self(None)
    }

    /// A pending barrier plus the signal that opens it.
    #[must_use]
    pub fn pending() -> (FontsSignal, Self) {
        let (tx, rx) = watch::channel(false);
        (FontsSignal(tx), Self(Some(rx)))
    }

    /// Waits until the barrier opens.
    ///
    /// A dropped [`FontsSignal`] unblocks waiters rather than stalling the
    /// extraction.
    pub async fn wait(&self) {
        let Some(rx) = &self.0 else {
            return;
        };
        let mut rx = rx.clone();
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

/// Opens a pending [`FontsBarrier`].
#[derive(Debug)]
pub struct FontsSignal(watch::Sender<bool>);

impl FontsSignal {
    /// Marks fonts as loaded; every current and future `wait` resolves.
    pub fn notify(&self) {
        let _ = self.0.send(true);
    }
}
