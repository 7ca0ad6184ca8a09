use honggfuzz::fuzz;
use xmlprobe::check_bytes;

fn main() {
    loop {
        fuzz! {|data: &[u8]|{
            if let Err(failure) = check_bytes(data) {
                assert!(failure.offset <= data.len());
            }
        }
        }
    }
}
