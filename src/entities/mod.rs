pub mod film;
