#[cfg(test)]
mod discovery;
