//! Browser event-loop scheduler.

use platform_host::{TaskFuture, TaskScheduler};

#[derive(Debug, Clone, Copy, Default)]
/// Spawns onto the browser microtask queue and sleeps with `setTimeout`.
pub struct WebScheduler;

impl TaskScheduler for WebScheduler {
    fn spawn_local(&self, task: TaskFuture) {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            futures::executor::block_on(task);
        }
    }

    fn sleep(&self, duration_ms: u32) -> TaskFuture {
        #[cfg(target_arch = "wasm32")]
        {
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                if let Some(window) = web_sys::window() {
                    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        &resolve,
                        duration_ms.min(i32::MAX as u32) as i32,
                    );
                }
            });
            Box::pin(async move {
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = duration_ms;
            Box::pin(futures::future::ready(()))
        }
    }
}
