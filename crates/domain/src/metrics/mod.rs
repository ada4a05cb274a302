pub mod yields;

pub use yields::{
    PoolYields, YieldCalculator, YieldPolicy, YieldWindow, annualized_rate, average,
    trimmed_average,
};
