pub mod checksum;
pub mod ip;
pub mod pseudo;
pub mod tcp;
