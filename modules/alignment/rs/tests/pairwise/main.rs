mod global;
mod properties;
