//! Cross-thread tests for the stdin ring.

use std::thread;
use std::time::Duration;

use burrow_kernel::InputSource;
use burrow_kernel::channel::channel;

fn wait_until_parked(ring: &burrow_kernel::channel::SharedRing) {
    while ring.parked_readers() == 0 {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn parked_reader_wakes_on_write() {
    let (mut writer, mut reader) = channel(64);
    let handle = thread::spawn(move || {
        let mut buf = [0u8; 16];
        let n = reader.read(&mut buf);
        (buf[..n].to_vec(), reader)
    });

    wait_until_parked(writer.ring());
    assert_eq!(writer.write("hello"), 5);

    let (got, reader) = handle.join().unwrap();
    assert_eq!(got, b"hello");
    assert_eq!(reader.ring().parked_readers(), 0);
}

#[test]
fn close_wakes_parked_reader_with_end_of_input() {
    let (mut writer, mut reader) = channel(16);
    let handle = thread::spawn(move || reader.read_line());

    wait_until_parked(writer.ring());
    writer.close();

    assert_eq!(handle.join().unwrap(), None);
}

#[test]
fn bytes_arrive_in_order_across_wraparound() {
    const TOTAL: usize = 10_000;
    let (mut writer, mut reader) = channel(7);
    let expected: Vec<u8> = (0..TOTAL).map(|i| (i % 251) as u8).collect();

    let consumer = thread::spawn(move || {
        let mut received = Vec::with_capacity(TOTAL);
        let mut buf = [0u8; 3];
        loop {
            let n = reader.read(&mut buf);
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
        received
    });

    let mut sent = 0;
    while sent < TOTAL {
        sent += writer.write_bytes(&expected[sent..]);
        if writer.ring().available() == 0 {
            thread::yield_now();
        }
    }
    writer.close();

    assert_eq!(consumer.join().unwrap(), expected);
}

#[test]
fn overflow_truncates_without_corrupting() {
    let (mut writer, mut reader) = channel(8);
    assert_eq!(writer.write("abc"), 3);
    // Four slots left; the rest of this write is dropped.
    assert_eq!(writer.write("defghij"), 4);
    assert_eq!(writer.ring().available(), 0);
    assert_eq!(writer.write("k"), 0);

    let mut buf = [0u8; 16];
    let n = reader.try_read(&mut buf);
    assert_eq!(&buf[..n], b"abcdefg");

    assert_eq!(writer.write("xyz"), 3);
    let n = reader.try_read(&mut buf);
    assert_eq!(&buf[..n], b"xyz");
}

#[test]
fn lines_split_across_writes() {
    let (mut writer, mut reader) = channel(32);
    let consumer = thread::spawn(move || {
        let mut lines = Vec::new();
        while let Some(line) = reader.read_line() {
            lines.push(line);
        }
        lines
    });

    for chunk in ["ec", "ho one\nech", "o two", "\n", "tail"] {
        writer.write(chunk);
        thread::sleep(Duration::from_millis(2));
    }
    drop(writer);

    assert_eq!(consumer.join().unwrap(), vec!["echo one", "echo two", "tail"]);
}
