use log::{debug, trace, warn};
use mq_publish_wire::constants::HEADER_LEN;
use mq_publish_wire::frame::Frame;
use mq_publish_wire::header::Header;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// reads one `Frame` from the stream.
pub async fn read_frame<S>(s: &mut S) -> Result<Frame, tokio::io::Error>
where
    S: AsyncReadExt + Unpin + Send,
{
    let mut header_buf = [0u8; HEADER_LEN];
    if let Err(e) = s.read_exact(&mut header_buf).await {
        warn!("error occurred while reading from the socket: {}", e);
        return Err(e);
    }
    debug!("incoming header: {:?}", header_buf);

    let header = Header::try_from(&header_buf[..]).map_err(|e| {
        warn!("could not parse header: {}", e);
        tokio::io::Error::new(tokio::io::ErrorKind::InvalidData, e.to_string())
    })?;
    trace!("{:?}", header);

    let mut pkt_buf = header_buf.to_vec();
    pkt_buf.resize(header.frame_len(), 0);
    s.read_exact(&mut pkt_buf[HEADER_LEN..]).await?;

    Frame::try_from(pkt_buf)
        .map_err(|e| tokio::io::Error::new(tokio::io::ErrorKind::InvalidData, e.to_string()))
}

/// writes one `Frame` to the stream.
pub async fn write_frame<S>(s: &mut S, frame: &Frame) -> Result<(), tokio::io::Error>
where
    S: AsyncWriteExt + Unpin + Send,
{
    trace!("writing frame: {:?}", frame.header);
    s.write_all(&frame.bytes()).await?;
    s.flush().await
}
