mod common;
mod expiry_tests;
mod market_tests;
mod smile_tests;
mod solver_tests;
