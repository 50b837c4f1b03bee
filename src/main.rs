#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use fsc::app;
use fsc::app::file_dialog::NativeDialogService;
use std::sync::{Arc, Mutex};
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use tracing_subscriber::EnvFilter;
use wry::WebViewBuilder;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let event_loop = EventLoopBuilder::<app::events::UserEvent>::with_user_event().build();

    let window = WindowBuilder::new()
        .with_title("FSC")
        .with_inner_size(tao::dpi::LogicalSize::new(880, 620))
        .with_min_inner_size(tao::dpi::LogicalSize::new(520, 360))
        .build(&event_loop)
        .expect("Failed to build Window");

    #[cfg(target_os = "macos")]
    fsc::platform::macos::ensure_main_menu();

    let proxy = event_loop.create_proxy();
    let state = Arc::new(Mutex::new(app::state::AppState::default()));
    let dialog_service = Arc::new(NativeDialogService {});

    let ipc_handler_state = state.clone();
    let ipc_handler_proxy = proxy.clone();
    let ipc_handler_dialog = dialog_service.clone();
    let ipc_handler = move |message: String| {
        app::handle_ipc_message(
            message,
            ipc_handler_dialog.clone(),
            ipc_handler_proxy.clone(),
            ipc_handler_state.clone(),
        );
    };

    let webview = WebViewBuilder::new(&window)
        .with_html(include_str!("ui/index.html"))
        .with_devtools(cfg!(debug_assertions))
        .with_ipc_handler(ipc_handler)
        .build()
        .expect("Failed to build WebView");

    let state_for_events = state.clone();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                tracing::info!("Close requested. Saving root list...");
                state_for_events
                    .lock()
                    .expect("Mutex was poisoned. This should not happen.")
                    .persist_config();
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(user_event) => {
                app::handle_user_event(user_event, &webview);
            }
            _ => (),
        }
    });
}
