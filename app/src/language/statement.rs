/// Anything in a parsed query which can be written back as query text.
pub trait Statement {
    fn dump(&self) -> String;
}
