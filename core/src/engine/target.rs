use crate::config::{AppConfig, BoardConfig};
use crate::error::CoreError;

/// What a `send` command refers to.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    All,
    Board(&'a BoardConfig),
    Area { board: &'a BoardConfig, area: &'a str },
}

impl Target<'_> {
    pub fn label(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Board(b) => b.key.clone(),
            Self::Area { board, area } => format!("{}/{}", board.key, area),
        }
    }
}

/// `all`, then board keys, then area labels of category boards; all
/// case-insensitive.
pub fn resolve_target<'a>(cfg: &'a AppConfig, name: &str) -> Result<Target<'a>, CoreError> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("all") {
        return Ok(Target::All);
    }
    if let Some(board) = cfg.board(name) {
        return Ok(Target::Board(board));
    }
    cfg.boards
        .iter()
        .find_map(|board| board.area(name).map(|area| Target::Area { board, area }))
        .ok_or_else(|| CoreError::UnknownTarget(name.to_string()))
}
