mod cfb_reader;
mod container;
