pub mod champion_stats;
pub mod match_history;
pub mod ranked;
pub mod recommender;
pub mod threat;
