mod core;

pub use self::core::{
    ExtractConfig, ExtractError, FieldOutput, GROUP_SIZE, extract, extract_into,
    extract_split_baseline, locate_field, validate_config,
};
