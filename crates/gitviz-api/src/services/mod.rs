// Services layer for business logic
// Services own translation and persistence, calling the store directly

pub mod event;

pub use event::EventService;
