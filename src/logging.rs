mod ceremony_log_context;

pub use self::ceremony_log_context::CeremonyLogContext;
