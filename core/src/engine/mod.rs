mod deliver;
mod run;
mod target;

pub use deliver::deliver;
pub use run::{board_digest, load_board, send_personal, send_target, Outcome, OutcomeKind, SendReport};
pub use target::{resolve_target, Target};
