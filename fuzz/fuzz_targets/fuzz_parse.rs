#![no_main]

use libfuzzer_sys::fuzz_target;

// parse → validate must never panic on arbitrary text; any decodable input
// must uphold the `valid == errors.is_empty()` invariant.
fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data)
        && let Ok(result) = eventpattern::check(input)
    {
        assert_eq!(result.valid, result.errors.is_empty());
    }
});
