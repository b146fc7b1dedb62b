mod depth;
mod level;
mod order;
mod side;
mod snapshot;
mod trade;

pub use depth::OrderDepth;
pub use level::{BookLevel, Level};
pub use order::Order;
pub use side::Side;
pub use snapshot::{Observations, TickSnapshot};
pub use trade::MarketTrade;
