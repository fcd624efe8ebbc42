//! Common regex patterns for ID card text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Name with its value on the same line ("Name: John Smith")
    pub static ref NAME_INLINE: Regex = Regex::new(
        r"(?i)name[:\s]+(.+)"
    ).unwrap();

    // Two capitalized words at the start of a line
    pub static ref NAME_SHAPE: Regex = Regex::new(
        r"^[A-Z][a-z]+\s+[A-Z][a-z]+"
    ).unwrap();

    // Identifier run on a labelled line
    pub static ref ID_RUN: Regex = Regex::new(
        r"(?i)[A-Z0-9-]{5,}"
    ).unwrap();

    // Identifier run on the line after a label (uppercase only)
    pub static ref ID_RUN_UPPER: Regex = Regex::new(
        r"[A-Z0-9-]{5,}"
    ).unwrap();

    // A line that is nothing but an identifier
    pub static ref ID_STANDALONE: Regex = Regex::new(
        r"^[A-Z0-9-]{6,15}$"
    ).unwrap();

    // D/M/Y in any order, '/' or '-' separated
    pub static ref DATE: Regex = Regex::new(
        r"[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}"
    ).unwrap();

    // Normalized MM/DD/YYYY
    pub static ref DATE_NORMALIZED: Regex = Regex::new(
        r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$"
    ).unwrap();
}
