pub mod logout;
