pub mod litle;

pub use self::litle::Litle;
