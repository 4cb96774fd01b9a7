use crate::config::LinkConfig;
use crate::error::Result;
use serialport::SerialPort;
use std::io::{ErrorKind, Read};

pub(crate) fn open_port(port_name: &str, config: &LinkConfig) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(port_name, config.baud_rate)
        .timeout(config.read_timeout())
        .open()?;
    log::info!("Opened serial port {} at {} baud", port_name, config.baud_rate);
    Ok(port)
}

pub(crate) fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize> {
    let n_u32: u32 = port.bytes_to_read()?;
    Ok(n_u32.try_into().unwrap_or(0))
}

/// Discards whatever the device sent before we started listening.
pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<usize> {
    let n_read: usize = get_n_read(port).unwrap_or(0);
    if n_read == 0 {
        return Ok(0);
    }
    let mut stale: Vec<u8> = vec![0; n_read];
    let n = port.read(stale.as_mut_slice())?;
    Ok(n)
}

/// Blocking read bounded by the port timeout. A timeout reads zero bytes.
pub(crate) fn read_chunk(port: &mut Box<dyn SerialPort>, buffer: &mut [u8]) -> Result<usize> {
    match port.read(buffer) {
        Ok(n) => Ok(n),
        Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::sleep_ms;
    use serialport::TTYPort;
    use std::io::Write;

    #[test]
    fn test_flush() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        master.write_all(b"stale boot noise\n").unwrap();

        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;

        sleep_ms(10);

        assert_eq!(slave_ptr.bytes_to_read().unwrap(), 17);
        assert_eq!(flush(&mut slave_ptr).unwrap(), 17);
        assert_eq!(slave_ptr.bytes_to_read().unwrap(), 0);

        // when zero bytes to read
        assert_eq!(flush(&mut slave_ptr).unwrap(), 0);
    }

    #[test]
    fn test_read_chunk() {
        let (mut master, mut slave) = TTYPort::pair().expect("Unable to create ptty pair");
        slave
            .set_timeout(std::time::Duration::from_millis(20))
            .unwrap();
        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;

        let mut buffer = [0u8; 64];
        // nothing sent yet, the timeout reads as zero bytes
        assert_eq!(read_chunk(&mut slave_ptr, &mut buffer).unwrap(), 0);

        master.write_all(b"A:1:D:2\n").unwrap();
        sleep_ms(10);
        let n = read_chunk(&mut slave_ptr, &mut buffer).unwrap();
        assert_eq!(&buffer[..n], b"A:1:D:2\n");
    }
}
