mod common;

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use common::MockBackend;
use native_canvas::{Event, FileBlob, Platform, RawEvent};

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("native-canvas-it-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("write temp file");
    path
}

fn canvas_platform() -> Platform<MockBackend> {
    let mut platform = Platform::new(MockBackend::new((800, 800)));
    platform.create_element("canvas", None, None).expect("window creation");
    platform
}

/// Keep polling until the predicate holds or the deadline passes
fn poll_until<F: Fn() -> bool>(platform: &mut Platform<MockBackend>, done: F) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        platform.poll_events();
        if Instant::now() > deadline {
            panic!("drop batch did not settle in time");
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_drop_batch_delivers_blobs_in_drop_order() {
    let a = temp_file("a.bin", b"first");
    let b = temp_file("b.bin", b"second");

    let mut platform = canvas_platform();
    let batches: Rc<RefCell<Vec<Vec<FileBlob>>>> = Rc::new(RefCell::new(Vec::new()));
    let batches_clone = Rc::clone(&batches);
    platform.on("drop", move |event| {
        if let Event::Drop(blobs) = event {
            batches_clone.borrow_mut().push(blobs.clone());
        }
    });

    platform
        .backend_mut()
        .queue(vec![RawEvent::DroppedPaths(vec![a.clone(), b.clone()])]);
    poll_until(&mut platform, || !batches.borrow().is_empty());

    let batches = batches.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
    assert_eq!(batches[0][0].path, a);
    assert_eq!(batches[0][0].data, b"first");
    assert_eq!(batches[0][1].path, b);
    assert_eq!(batches[0][1].data, b"second");

    let _ = fs::remove_file(a);
    let _ = fs::remove_file(b);
}

#[test]
fn test_failed_read_discards_whole_batch() {
    let good = temp_file("good.bin", b"payload");
    let missing = std::env::temp_dir().join("native-canvas-it-missing.bin");

    let mut platform = canvas_platform();
    let invoked = Rc::new(RefCell::new(0));
    let invoked_clone = Rc::clone(&invoked);
    platform.on("drop", move |_| *invoked_clone.borrow_mut() += 1);

    platform
        .backend_mut()
        .queue(vec![RawEvent::DroppedPaths(vec![good.clone(), missing])]);

    // poll until the loader settles, then a few extra cycles
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        platform.poll_events();
        std::thread::sleep(Duration::from_millis(1));
        if *invoked.borrow() > 0 {
            break;
        }
    }
    assert_eq!(*invoked.borrow(), 0);

    let _ = fs::remove_file(good);
}

#[test]
fn test_pending_batch_does_not_block_other_events() {
    let file = temp_file("interleave.bin", b"bytes");

    let mut platform = canvas_platform();
    let batches = Rc::new(RefCell::new(0));
    let batches_clone = Rc::clone(&batches);
    platform.on("drop", move |_| *batches_clone.borrow_mut() += 1);

    let moves = Rc::new(RefCell::new(0));
    let moves_clone = Rc::clone(&moves);
    platform.on("mousemove", move |_| *moves_clone.borrow_mut() += 1);

    platform
        .backend_mut()
        .queue(vec![RawEvent::DroppedPaths(vec![file.clone()])]);
    platform
        .backend_mut()
        .queue(vec![RawEvent::MouseMove { x: 1.0, y: 2.0 }]);
    platform
        .backend_mut()
        .queue(vec![RawEvent::MouseMove { x: 3.0, y: 4.0 }]);

    // intervening poll cycles keep dispatching while the batch loads
    poll_until(&mut platform, || *batches.borrow() > 0);
    // drain whatever scripted cycles the loader outpaced
    platform.poll_events();
    platform.poll_events();
    assert_eq!(*moves.borrow(), 2);
    assert_eq!(*batches.borrow(), 1);

    let _ = fs::remove_file(file);
}

#[test]
fn test_drop_without_listener_loads_nothing() {
    let file = temp_file("ignored.bin", b"bytes");

    let mut platform = canvas_platform();
    platform
        .backend_mut()
        .queue(vec![RawEvent::DroppedPaths(vec![file.clone()])]);
    platform.poll_events();
    platform.poll_events();

    let _ = fs::remove_file(file);
}

#[test]
fn test_each_registered_listener_sees_the_batch_once() {
    let file = temp_file("fanout.bin", b"bytes");

    let mut platform = canvas_platform();
    let first = Rc::new(RefCell::new(0));
    let second = Rc::new(RefCell::new(0));
    for counter in [&first, &second] {
        let counter = Rc::clone(counter);
        platform.on("drop", move |_| *counter.borrow_mut() += 1);
    }

    platform
        .backend_mut()
        .queue(vec![RawEvent::DroppedPaths(vec![file.clone()])]);
    poll_until(&mut platform, || *first.borrow() > 0);

    assert_eq!(*first.borrow(), 1);
    assert_eq!(*second.borrow(), 1);

    let _ = fs::remove_file(file);
}
