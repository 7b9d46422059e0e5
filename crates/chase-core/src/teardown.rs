use crate::error::SceneResult;

/// A render-side resource the scene must release when it is torn down.
pub trait Disposable {
    fn label(&self) -> &str;
    fn dispose(&mut self) -> SceneResult<()>;
}

/// Registry of resources acquired at setup.
///
/// Everything registered is released exactly once, in reverse order of
/// registration, either by `release_all` or on drop.
#[derive(Default)]
pub struct Teardown {
    items: Vec<Box<dyn Disposable>>,
    released: bool,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mut item: Box<dyn Disposable>) {
        if self.released {
            log::warn!(
                "[teardown] {} registered after release, disposing now",
                item.label()
            );
            if let Err(e) = item.dispose() {
                log::warn!("[teardown] {}: {e}", item.label());
            }
            return;
        }
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release everything still held. Failures are logged and do not stop the
    /// remaining releases. Returns how many resources released cleanly; a
    /// second call is a no-op returning 0.
    pub fn release_all(&mut self) -> usize {
        if self.released {
            return 0;
        }
        self.released = true;
        let mut ok = 0;
        while let Some(mut item) = self.items.pop() {
            match item.dispose() {
                Ok(()) => {
                    log::debug!("[teardown] released {}", item.label());
                    ok += 1;
                }
                Err(e) => log::warn!("[teardown] {}: {e}", item.label()),
            }
        }
        ok
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.release_all();
    }
}
