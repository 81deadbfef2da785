pub mod compile;
pub mod quantize;
