mod draw;
mod lottery;
mod recommendation;
mod statistics;

pub use draw::DrawRecord;
pub use lottery::{LotteryCatalog, LotteryTypeConfig};
pub use recommendation::{RecommendationResult, StatisticBasis, Strategy};
pub use statistics::NumberStatistic;
