mod helpers;
mod logout;
