//! Config module - session preconditions and the leaderboard key
//!
//! Full schema validation belongs to whoever loads the configuration. This
//! module only rejects what a session cannot run without: impossible piece
//! sizes, a grid too small to spawn into, missing score tables and missing
//! catalogs.

use std::fmt;

use crate::catalog::Catalogs;
use crate::types::{GameConfig, MAX_LOOKAHEAD, MAX_PIECE_SIZE};

/// Reasons a session cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    NoPieceSizes,
    UnsupportedSize(u8),
    ZeroChance(u8),
    LookaheadTooLong(usize),
    /// Width or height is not above the largest piece size.
    GridTooSmall { width: u16, height: u16, largest: u8 },
    ZeroLinesPerLevel,
    ZeroSpeed,
    /// No `lines` / `lines_per_level` score entry for this line count.
    MissingLineScore(u32),
    /// A `random` or `bag` size has no complete catalog.
    MissingCatalog(u8),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NoPieceSizes => "no_piece_sizes",
            ConfigError::UnsupportedSize(_) => "unsupported_size",
            ConfigError::ZeroChance(_) => "zero_chance",
            ConfigError::LookaheadTooLong(_) => "lookahead_too_long",
            ConfigError::GridTooSmall { .. } => "grid_too_small",
            ConfigError::ZeroLinesPerLevel => "zero_lines_per_level",
            ConfigError::ZeroSpeed => "zero_speed",
            ConfigError::MissingLineScore(_) => "missing_line_score",
            ConfigError::MissingCatalog(_) => "missing_catalog",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConfigError::NoPieceSizes => "no piece sizes configured".to_string(),
            ConfigError::UnsupportedSize(n) => {
                format!("piece size {} is outside 1..={}", n, MAX_PIECE_SIZE)
            }
            ConfigError::ZeroChance(n) => format!("piece size {} has a chance of 0", n),
            ConfigError::LookaheadTooLong(n) => {
                format!("next_pieces is {}, at most {} allowed", n, MAX_LOOKAHEAD)
            }
            ConfigError::GridTooSmall {
                width,
                height,
                largest,
            } => format!(
                "grid {}x{} must be wider and taller than the largest piece size {}",
                width, height, largest
            ),
            ConfigError::ZeroLinesPerLevel => "lines_per_level must be positive".to_string(),
            ConfigError::ZeroSpeed => "speed must be positive".to_string(),
            ConfigError::MissingLineScore(n) => {
                format!("scoring has no entry for {} lines", n)
            }
            ConfigError::MissingCatalog(n) => {
                format!("no complete catalog for piece size {}", n)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ConfigError {}

/// Check everything a session needs from `config`, without catalogs.
pub fn check_rules(config: &GameConfig) -> Result<(), ConfigError> {
    if config.polyominoes.is_empty() {
        return Err(ConfigError::NoPieceSizes);
    }
    for (&size, poly) in &config.polyominoes {
        if size == 0 || size > MAX_PIECE_SIZE {
            return Err(ConfigError::UnsupportedSize(size));
        }
        if poly.chance == 0 {
            return Err(ConfigError::ZeroChance(size));
        }
    }
    if config.next_pieces > MAX_LOOKAHEAD {
        return Err(ConfigError::LookaheadTooLong(config.next_pieces));
    }

    let largest = config.largest_size();
    if config.width <= largest as u16 || config.height <= largest as u16 {
        return Err(ConfigError::GridTooSmall {
            width: config.width,
            height: config.height,
            largest,
        });
    }
    if config.lines_per_level == 0 {
        return Err(ConfigError::ZeroLinesPerLevel);
    }
    if config.speed == 0 {
        return Err(ConfigError::ZeroSpeed);
    }

    // A single lock can clear at most as many rows as the piece is tall.
    for n in 1..=largest as u32 {
        let scoring = &config.scoring;
        if !scoring.lines.contains_key(&n) || !scoring.lines_per_level.contains_key(&n) {
            return Err(ConfigError::MissingLineScore(n));
        }
    }
    Ok(())
}

/// [`check_rules`] plus a complete catalog for every non-jit size.
pub fn check_config(config: &GameConfig, catalogs: &Catalogs) -> Result<(), ConfigError> {
    check_rules(config)?;
    for (&size, poly) in &config.polyominoes {
        if !poly.next_piece.needs_catalog() {
            continue;
        }
        let complete = catalogs
            .get(&size)
            .map(|c| c.size() == size && !c.is_empty())
            .unwrap_or(false);
        if !complete {
            return Err(ConfigError::MissingCatalog(size));
        }
    }
    Ok(())
}

/// Canonical rule-set string; finished games are ranked per key.
///
/// Everything that affects scoring is included. Description, colours and
/// `extra_spacing` are not.
pub fn leaderboard_key(config: &GameConfig) -> String {
    let mut out = String::new();

    for (n, poly) in sorted_by_text(config.polyominoes.iter()) {
        out.push_str(&format!("{}:{},", n, poly.next_piece.as_str()));
        out.push_str(&format!("{}:{},", n, poly.chance));
    }

    let scoring = &config.scoring;
    for bonus in [
        scoring.polyomino,
        scoring.softdrop,
        scoring.harddrop,
        scoring.level_up,
    ] {
        out.push_str(&format!("{},", bonus));
    }
    for (n, v) in sorted_by_text(scoring.lines.iter()) {
        out.push_str(&format!("{}:{},", n, v));
    }
    for (n, v) in sorted_by_text(scoring.lines_per_level.iter()) {
        out.push_str(&format!("{}:{},", n, v));
    }

    let fields = [
        ("lines_per_level", config.lines_per_level.to_string()),
        ("first_level", config.first_level.to_string()),
        ("speed", config.speed.to_string()),
        ("speed_per_level", config.speed_per_level.to_string()),
        ("width", config.width.to_string()),
        ("height", config.height.to_string()),
        ("next_pieces", config.next_pieces.to_string()),
        ("ghost", if config.ghost { "True" } else { "False" }.to_string()),
    ];
    for (field, value) in fields {
        out.push_str(&format!("{}:{},", field, value));
    }

    out.pop();
    out
}

/// Order map entries by the decimal text of their key ("10" before "2").
fn sorted_by_text<'a, K, V, I>(entries: I) -> Vec<(String, &'a V)>
where
    K: ToString + 'a,
    V: 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let mut out: Vec<(String, &V)> = entries.map(|(k, v)| (k.to_string(), v)).collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::types::{ColorScheme, PolyominoConfig, SupplyStrategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn classic_passes_with_its_catalog() {
        let config = GameConfig::classic();
        assert_eq!(
            check_config(&config, &Catalogs::new()),
            Err(ConfigError::MissingCatalog(4))
        );

        let mut rng = StdRng::seed_from_u64(1);
        let mut catalogs = Catalogs::new();
        catalogs.insert(4, Arc::new(build_catalog(4, &mut rng).unwrap()));
        assert_eq!(check_config(&config, &catalogs), Ok(()));
    }

    #[test]
    fn rejects_impossible_rules() {
        let mut config = GameConfig::classic();
        config.polyominoes.clear();
        assert_eq!(check_rules(&config), Err(ConfigError::NoPieceSizes));

        let mut config = GameConfig::classic();
        config.next_pieces = 5;
        assert_eq!(check_rules(&config), Err(ConfigError::LookaheadTooLong(5)));

        let mut config = GameConfig::classic();
        config.width = 4;
        assert_eq!(check_rules(&config).unwrap_err().code(), "grid_too_small");

        let mut config = GameConfig::classic();
        config.polyominoes.insert(
            31,
            PolyominoConfig {
                next_piece: SupplyStrategy::JustInTime,
                chance: 1,
                colors: ColorScheme::Gray,
            },
        );
        assert_eq!(check_rules(&config), Err(ConfigError::UnsupportedSize(31)));
    }

    #[test]
    fn rejects_missing_line_scores() {
        let mut config = GameConfig::classic();
        config.polyominoes.insert(
            5,
            PolyominoConfig {
                next_piece: SupplyStrategy::JustInTime,
                chance: 1,
                colors: ColorScheme::Retro,
            },
        );
        assert_eq!(check_rules(&config), Err(ConfigError::MissingLineScore(5)));
    }

    #[test]
    fn classic_leaderboard_key() {
        let key = leaderboard_key(&GameConfig::classic());
        assert_eq!(
            key,
            "4:bag,4:1,0,1,2,0,1:40,2:100,3:300,4:1200,1:40,2:100,3:300,4:1200,\
             lines_per_level:10,first_level:1,speed:10,speed_per_level:2,\
             width:10,height:20,next_pieces:3,ghost:True"
        );
    }

    #[test]
    fn leaderboard_key_sorts_sizes_as_text() {
        let mut config = GameConfig::classic();
        config.ghost = false;
        for size in [2u8, 10] {
            config.polyominoes.insert(
                size,
                PolyominoConfig {
                    next_piece: SupplyStrategy::JustInTime,
                    chance: 2,
                    colors: ColorScheme::Original,
                },
            );
        }
        let key = leaderboard_key(&config);
        assert!(key.starts_with("10:jit,10:2,2:jit,2:2,4:bag,4:1,"), "{}", key);
        assert!(key.ends_with("ghost:False"));
    }

    #[test]
    fn cosmetic_fields_do_not_change_the_key() {
        let a = GameConfig::classic();
        let mut b = GameConfig::classic();
        b.description = "Something else".to_string();
        b.extra_spacing = true;
        if let Some(p) = b.polyominoes.get_mut(&4) {
            p.colors = ColorScheme::Gray;
        }
        assert_eq!(leaderboard_key(&a), leaderboard_key(&b));
    }
}
