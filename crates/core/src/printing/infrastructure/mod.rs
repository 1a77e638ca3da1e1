pub mod spool_printer;
