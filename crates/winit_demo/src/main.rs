use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = app::App::default();
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

mod app {
    use anyhow::Result;
    use std::sync::Arc;
    use webgpu_boot_wgpu::{Bootstrap, IMPLEMENTATION};
    use winit::{
        application::ApplicationHandler,
        event::WindowEvent,
        event_loop::ActiveEventLoop,
        window::{Window, WindowId},
    };

    #[derive(Default)]
    pub struct App {
        bootstrap: Option<Bootstrap>,
        pub error: Option<anyhow::Error>,
        window: Option<Arc<Window>>,
    }

    impl App {
        fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
            let window = event_loop.create_window(
                Window::default_attributes().with_title("WebGPU bootstrap"),
            )?;
            let window = Arc::new(window);

            log::info!("Using the {:?} implementation", IMPLEMENTATION);

            let bootstrap = futures::executor::block_on(Bootstrap::new(window.clone()))?;

            print!("{}", bootstrap.report()?);
            println!("Preferred surface format: {:?}", bootstrap.surface_format()?);

            self.bootstrap = Some(bootstrap);
            self.window = Some(window);

            Ok(())
        }
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.bootstrap.is_some() {
                return;
            }

            if let Err(err) = self.init(event_loop) {
                log::error!("{:#}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }

        fn window_event(
            &mut self,
            event_loop: &ActiveEventLoop,
            _id: WindowId,
            event: WindowEvent,
        ) {
            if let WindowEvent::CloseRequested = event {
                // The surface must go before the window it was created from.
                self.bootstrap = None;
                self.window = None;

                event_loop.exit();
            }
        }
    }
}
