/// Price in integer ticks
pub type Price = i64;

/// Signed quantity: positive = buy/long, negative = sell/short
pub type Quantity = i64;

/// Simulator timestamp (one value per tick)
pub type Timestamp = i64;

/// Symbol identifier for a tradeable instrument
pub type Symbol = String;
