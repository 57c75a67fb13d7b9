// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Write cases against real channels.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chansel::{Select, SelectError};
use chansel_chan::buffered;

#[tokio::test]
async fn write_to_the_one_with_room() {
    let (tx1, _rx1) = buffered::<i32>(1);
    let (tx2, rx2) = buffered::<i64>(1);
    tx1.try_send(10).unwrap();

    let mut select = Select::new();
    let first = select.write(&tx1, 11);
    let second = select.write(&tx2, 42);
    select.wait().await.unwrap();

    assert_eq!(first.is_matching(), Ok(false));
    assert_eq!(second.is_matching(), Ok(true));
    assert_eq!(rx2.try_recv(), Ok(42));
}

#[tokio::test]
async fn default_when_everything_full() {
    let (tx1, rx1) = buffered::<i32>(1);
    let (tx2, _rx2) = buffered::<i64>(1);
    tx1.try_send(10).unwrap();
    tx2.try_send(11).unwrap();

    let mut select = Select::new();
    let first = select.write(&tx1, 11);
    let second = select.write(&tx2, 42);
    let default = select.default_case();
    select.wait().await.unwrap();

    assert_eq!(first.is_matching(), Ok(false));
    assert_eq!(second.is_matching(), Ok(false));
    assert_eq!(default.is_matching(), Ok(true));
    assert_eq!(rx1.try_recv(), Ok(10));
}

#[tokio::test]
async fn writable_beats_default() {
    let (tx1, rx1) = buffered::<i32>(1);
    let (tx2, _rx2) = buffered::<i64>(1);
    tx2.try_send(11).unwrap();

    let mut select = Select::new();
    let first = select.write(&tx1, 11);
    let second = select.write(&tx2, 42);
    let default = select.default_case();
    select.wait().await.unwrap();

    assert_eq!(first.is_matching(), Ok(true));
    assert_eq!(second.is_matching(), Ok(false));
    assert_eq!(default.is_matching(), Ok(false));
    assert_eq!(rx1.try_recv(), Ok(11));
}

#[test]
fn handles_before_wait_are_not_ready() {
    let (tx1, _rx1) = buffered::<i32>(1);
    let (tx2, _rx2) = buffered::<i64>(1);

    let mut select = Select::new();
    let first = select.write(&tx1, 11);
    let second = select.write(&tx2, 42);
    let default = select.default_case();

    assert_eq!(first.is_matching(), Err(SelectError::NotReady));
    assert_eq!(second.is_matching(), Err(SelectError::NotReady));
    assert_eq!(default.is_matching(), Err(SelectError::NotReady));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_writers_fill_both_channels() {
    let (tx1, _rx1) = buffered::<i32>(1);
    let (tx2, rx2) = buffered::<i64>(1);
    tx2.try_send(11).unwrap();

    let first_written = Arc::new(AtomicBool::new(false));
    let second_written = Arc::new(AtomicBool::new(false));

    let mut tasks = vec![];
    for _ in 0..2 {
        let (tx1, tx2, rx2) = (tx1.clone(), tx2.clone(), rx2.clone());
        let (first_written, second_written) = (first_written.clone(), second_written.clone());
        tasks.push(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;

            let mut select = Select::new();
            let first = select.write(&tx1, 10);
            let second = select.write(&tx2, 15);
            select.wait().await.unwrap();

            if first.is_matching().unwrap() {
                // Free the other channel for the second writer.
                assert_eq!(rx2.try_recv(), Ok(11));
                first_written.store(true, Ordering::SeqCst);
            } else if second.is_matching().unwrap() {
                second_written.store(true, Ordering::SeqCst);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert!(first_written.load(Ordering::SeqCst));
    assert!(second_written.load(Ordering::SeqCst));
}

#[tokio::test]
async fn write_to_closed_fails() {
    let (tx1, _rx1) = buffered::<i32>(1);
    let (tx2, _rx2) = buffered::<i64>(1);
    tx1.close();
    tx2.try_send(10).unwrap();

    let mut select = Select::new();
    let first = select.write(&tx1, 11);
    let second = select.write(&tx2, 42);

    assert_eq!(select.wait().await, Err(SelectError::ChannelClosed));
    assert_eq!(first.is_matching(), Err(SelectError::NotReady));
    assert_eq!(second.is_matching(), Err(SelectError::NotReady));
}

#[tokio::test]
async fn write_to_closed_fails_even_with_default() {
    let (tx1, _rx1) = buffered::<i32>(1);
    let (tx2, _rx2) = buffered::<i64>(1);
    tx1.close();
    tx2.try_send(10).unwrap();

    let mut select = Select::new();
    select.write(&tx1, 11);
    select.write(&tx2, 42);
    let default = select.default_case();

    assert_eq!(select.wait().await, Err(SelectError::ChannelClosed));
    assert_eq!(default.is_matching(), Err(SelectError::NotReady));
}

#[tokio::test]
async fn close_while_waiting_to_write_fails() {
    let (tx, _rx) = buffered::<i32>(1);
    tx.try_send(1).unwrap();
    let closer = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        closer.close();
    });

    let mut select = Select::new();
    select.write(&tx, 2);
    assert_eq!(select.wait().await, Err(SelectError::ChannelClosed));
}
