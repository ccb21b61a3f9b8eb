pub mod bitvec;
pub mod io;
