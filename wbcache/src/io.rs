use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Make sure reads cover many lines, 4096 is the standard block size (or a multiple of it) on most systems
const BUFFER_SIZE: usize = 64 * 4096;

/// Opens a trace file for a single sequential pass
pub fn open_trace<P: AsRef<Path>>(path: P) -> std::io::Result<Box<dyn BufRead>> {
    get_reader(File::open(path)?)
}

pub fn get_reader(file: File) -> std::io::Result<Box<dyn BufRead>> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)));
    }
    // Memory map the file on unix systems, the trace is read front to back exactly once
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // Zero length files can't be mapped
        if file.metadata()?.len() == 0 {
            return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)));
        }
        // The mapping is only sound while nothing truncates the file underneath it
        let mmap = unsafe { Mmap::map(&file)? };
        mmap.advise(Advice::Sequential)?;
        Ok(Box::new(Cursor::new(mmap)))
    }
}
