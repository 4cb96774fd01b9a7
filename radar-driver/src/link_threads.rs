use crate::constants::{N_BUFFERED_CHUNKS, PARSER_POLL_MS, READ_CHUNK_SIZE};
use crate::line::LineAssembler;
use crate::model::SharedModel;
use crate::notice::Notice;
use crate::serial::{flush, read_chunk};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use crossbeam_utils::atomic::AtomicCell;
use serialport::SerialPort;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Connection state as seen by the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStatus {
    Disconnected,
    /// Port is open, waiting for the board to settle.
    Settling,
    Connected,
}

pub(crate) type SharedStatus = Arc<AtomicCell<LinkStatus>>;

pub(crate) enum LinkMessage {
    Data(Vec<u8>),
    Failed(String),
}

/// Reader and parser threads of one open link.
///
/// The reader owns the port, so the port is released once the reader is joined.
pub(crate) struct LinkThreads {
    pub(crate) reader_terminator_tx: Sender<bool>,
    pub(crate) parser_terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<()>>,
    pub(crate) parser_thread: Option<JoinHandle<()>>,
}

pub(crate) fn spawn_link(
    port: Box<dyn SerialPort>,
    settle_delay: Duration,
    model: SharedModel,
    status: SharedStatus,
    notice_tx: Sender<Notice>,
) -> LinkThreads {
    let (reader_terminator_tx, reader_terminator_rx) = bounded(10);
    let (parser_terminator_tx, parser_terminator_rx) = bounded(10);
    let (chunk_tx, chunk_rx) = bounded::<LinkMessage>(N_BUFFERED_CHUNKS);

    status.store(LinkStatus::Settling);

    let reader_status = Arc::clone(&status);
    let reader_thread = Some(std::thread::spawn(move || {
        read_port_signal(
            port,
            settle_delay,
            chunk_tx,
            reader_terminator_rx,
            reader_status,
        );
    }));

    let parser_thread = Some(std::thread::spawn(move || {
        parse_lines(chunk_rx, parser_terminator_rx, model, status, notice_tx);
    }));

    LinkThreads {
        reader_terminator_tx,
        parser_terminator_tx,
        reader_thread,
        parser_thread,
    }
}

pub(crate) fn read_port_signal(
    mut port: Box<dyn SerialPort>,
    settle_delay: Duration,
    chunk_tx: Sender<LinkMessage>,
    reader_terminator_rx: Receiver<bool>,
    status: SharedStatus,
) {
    // Closing during the settle delay must not wait for it to elapse
    match reader_terminator_rx.recv_timeout(settle_delay) {
        Err(RecvTimeoutError::Timeout) => (),
        Ok(_) | Err(RecvTimeoutError::Disconnected) => return,
    }
    match flush(&mut port) {
        Ok(n) if n > 0 => log::debug!("Discarded {} stale bytes", n),
        Ok(_) => (),
        Err(e) => {
            let _ = chunk_tx.send(LinkMessage::Failed(e.to_string()));
            return;
        }
    }
    status.store(LinkStatus::Connected);

    let mut buffer = [0u8; READ_CHUNK_SIZE];
    loop {
        if do_terminate(&reader_terminator_rx) {
            return;
        }

        let message = match read_chunk(&mut port, &mut buffer) {
            Ok(0) => continue,
            Ok(n) => LinkMessage::Data(buffer[..n].to_vec()),
            Err(e) => LinkMessage::Failed(e.to_string()),
        };
        let failed = matches!(message, LinkMessage::Failed(_));
        if chunk_tx.send(message).is_err() || failed {
            return;
        }
    }
}

pub(crate) fn parse_lines(
    chunk_rx: Receiver<LinkMessage>,
    parser_terminator_rx: Receiver<bool>,
    model: SharedModel,
    status: SharedStatus,
    notice_tx: Sender<Notice>,
) {
    let mut assembler = LineAssembler::new();
    while !do_terminate(&parser_terminator_rx) {
        let message = match chunk_rx.recv_timeout(Duration::from_millis(PARSER_POLL_MS)) {
            Ok(message) => message,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return,
        };

        match message {
            LinkMessage::Data(data) => {
                assembler.extend(&data);
                while let Some(line) = assembler.next_line() {
                    let notice = model.lock().apply_line(&line, Instant::now());
                    notify(&notice_tx, notice);
                }
            }
            LinkMessage::Failed(reason) => {
                log::error!("Serial link failed: {}", reason);
                status.store(LinkStatus::Disconnected);
                let notice = model
                    .lock()
                    .report_error(format!("Connection error: {}", reason), Instant::now());
                notify(&notice_tx, notice);
                notify(&notice_tx, Some(Notice::ConnectionLost(reason)));
                return;
            }
        }
    }
}

/// Forwards a notice without ever blocking the caller.
pub(crate) fn notify(notice_tx: &Sender<Notice>, notice: Option<Notice>) {
    if let Some(notice) = notice {
        if let Err(e) = notice_tx.try_send(notice) {
            log::debug!("Notice dropped: {:?}", e.into_inner());
        }
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join link threads.
/// This function is automatically called when `link_threads` is dropped.
pub(crate) fn join(link_threads: &mut LinkThreads) {
    let _ = link_threads.reader_terminator_tx.send(true);
    let _ = link_threads.parser_terminator_tx.send(true);

    if let Some(thread) = link_threads.reader_thread.take() {
        if thread.join().is_err() {
            log::error!("Serial reader thread panicked");
        }
    }
    if let Some(thread) = link_threads.parser_thread.take() {
        if thread.join().is_err() {
            log::error!("Telemetry parser thread panicked");
        }
    }
}

impl Drop for LinkThreads {
    fn drop(&mut self) {
        join(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RadarConfig;
    use crate::model::RadarModel;
    use crate::time::sleep_ms;

    struct Harness {
        chunk_tx: Sender<LinkMessage>,
        terminator_tx: Sender<bool>,
        model: SharedModel,
        status: SharedStatus,
        notice_rx: Receiver<Notice>,
        thread: JoinHandle<()>,
    }

    fn spawn_parser() -> Harness {
        let (chunk_tx, chunk_rx) = bounded(10);
        let (terminator_tx, terminator_rx) = bounded(10);
        let (notice_tx, notice_rx) = bounded(10);
        let model = RadarModel::shared(&RadarConfig::default());
        let status = Arc::new(AtomicCell::new(LinkStatus::Connected));
        let thread = {
            let model = Arc::clone(&model);
            let status = Arc::clone(&status);
            std::thread::spawn(move || {
                parse_lines(chunk_rx, terminator_rx, model, status, notice_tx);
            })
        };
        Harness {
            chunk_tx,
            terminator_tx,
            model,
            status,
            notice_rx,
            thread,
        }
    }

    #[test]
    fn test_parse_lines() {
        let harness = spawn_parser();
        let data = b"A:0:D:50.0\nA:30:D:7".to_vec();
        harness.chunk_tx.send(LinkMessage::Data(data)).unwrap();
        let data = b"5.5\r\nEVENT:OBSTACLE\n".to_vec();
        harness.chunk_tx.send(LinkMessage::Data(data)).unwrap();

        assert_eq!(
            harness.notice_rx.recv_timeout(Duration::from_secs(1)),
            Ok(Notice::Obstacle)
        );
        {
            let model = harness.model.lock();
            assert_eq!(model.store().pose().angle, 30);
            assert_eq!(model.store().pose().distance, 75.5);
            assert_eq!(model.store().trail_len(), 2);
            assert_eq!(model.store().map_len(), 0);
        }

        harness.terminator_tx.send(true).unwrap();
        harness.thread.join().unwrap();
    }

    #[test]
    fn test_failure_disconnects() {
        let harness = spawn_parser();
        harness
            .chunk_tx
            .send(LinkMessage::Failed("device unplugged".to_string()))
            .unwrap();
        harness.thread.join().unwrap();

        assert_eq!(harness.status.load(), LinkStatus::Disconnected);
        assert_eq!(
            harness.notice_rx.try_recv(),
            Ok(Notice::Error(
                "Connection error: device unplugged".to_string()
            ))
        );
        assert_eq!(
            harness.notice_rx.try_recv(),
            Ok(Notice::ConnectionLost("device unplugged".to_string()))
        );
    }

    #[test]
    fn test_parser_exits_when_reader_is_gone() {
        let harness = spawn_parser();
        drop(harness.chunk_tx);
        sleep_ms(2 * PARSER_POLL_MS);
        harness.thread.join().unwrap();
    }

    #[test]
    fn test_notify_never_blocks() {
        let (notice_tx, notice_rx) = bounded(1);
        notify(&notice_tx, Some(Notice::Obstacle));
        notify(&notice_tx, Some(Notice::Metre));
        notify(&notice_tx, None);
        assert_eq!(notice_rx.try_recv(), Ok(Notice::Obstacle));
        assert!(notice_rx.try_recv().is_err());
    }
}
