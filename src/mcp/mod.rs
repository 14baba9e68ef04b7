mod server;

pub use server::VitaTrackService;
