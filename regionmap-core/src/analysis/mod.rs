pub mod contains;
