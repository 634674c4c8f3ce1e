pub mod resolver;

pub use resolver::{
    ensure_distinct_ranks, position_of, resolve_positional_swap, sort_standings, RankPolicy,
    Standing, SwapOutcome,
};
