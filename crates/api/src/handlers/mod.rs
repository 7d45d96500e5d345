pub mod swift_codes;
