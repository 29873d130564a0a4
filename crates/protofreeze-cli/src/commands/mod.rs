pub mod compile;
pub mod dump;
pub mod input_loader;
pub mod output;
pub mod types;

#[cfg(test)]
mod input_loader_tests;
#[cfg(test)]
mod output_tests;
