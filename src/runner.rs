use std::io;
use std::time::{Duration, Instant};

use crate::desktop::Desktop;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};

/// Drive `desktop` until it asks to quit: route every input event, then tick
/// and redraw once per loop turn.
pub fn run_desktop<O, D>(
    output: &mut O,
    driver: D,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> io::Result<()>
where
    O: OutputDriver,
    D: InputDriver,
{
    let (width, height) = output.size()?;
    desktop.set_viewport(width, height);

    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop
        .driver()
        .set_mouse_capture(desktop.shell().mouse_capture_enabled())?;

    event_loop.run(|driver, event| {
        let flow = match event {
            Some(evt) => desktop.handle_event(&evt),
            None => {
                desktop.tick(Instant::now());
                output.draw(|mut frame| desktop.render(&mut frame))?;
                ControlFlow::Continue
            }
        };
        if let Some(enabled) = desktop.take_mouse_capture_change() {
            driver.set_mouse_capture(enabled)?;
        }
        Ok(flow)
    })
}
