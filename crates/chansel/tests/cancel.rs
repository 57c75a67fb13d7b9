// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Bounding a blocking select with a cancel token.

use std::time::Duration;

use chansel::{CancelToken, Select, SelectConfig, SelectError};
use chansel_chan::{buffered, unbounded};

#[tokio::test]
async fn timeout_through_token() {
    let (_tx, rx) = unbounded::<i32>();
    let token = CancelToken::new();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        timer.cancel();
    });

    let mut select = Select::new();
    let read = select.read(&rx);
    assert_eq!(select.wait_with_cancel(&token).await, Err(SelectError::Cancelled));
    assert_eq!(read.is_matching(), Err(SelectError::NotReady));
}

#[tokio::test]
async fn cancelled_write_keeps_channel_untouched() {
    let (tx, rx) = buffered::<i32>(1);
    tx.try_send(1).unwrap();
    let token = CancelToken::new();
    token.cancel();

    let mut select = Select::new();
    select.write(&tx, 2);
    assert_eq!(select.wait_with_cancel(&token).await, Err(SelectError::Cancelled));
    assert_eq!(rx.try_recv(), Ok(1));
    assert!(rx.is_empty());
}

#[tokio::test]
async fn parent_cancel_reaches_select() {
    let (_tx, rx) = unbounded::<i32>();
    let parent = CancelToken::new();
    let child = parent.child();
    let canceller = parent.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let mut select = Select::new();
    select.read(&rx);
    assert_eq!(select.wait_with_cancel(&child).await, Err(SelectError::Cancelled));
}

#[tokio::test]
async fn value_before_timeout_wins() {
    let (tx, rx) = unbounded::<i32>();
    let token = CancelToken::new();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        timer.cancel();
    });
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(9).await.unwrap();
    });

    let mut select = Select::with_config(SelectConfig { shuffle: false });
    let read = select.read(&rx);
    select.wait_with_cancel(&token).await.unwrap();
    assert_eq!(read.value(), Ok(&9));
    assert!(!token.is_cancelled());
}
