use crate::{error::Error, stream::JsonStream};

use serde::de::DeserializeOwned;
use std::{io::Read, ops::ControlFlow};

/// What an iteration callback asks for after handling an item.
pub type Flow = ControlFlow<()>;

/// Keep iterating.
pub const CONTINUE: Flow = ControlFlow::Continue(());

/// Stop iterating without reporting an error.
pub const STOP: Flow = ControlFlow::Break(());

/// Decode every item of `stream` as `T` and hand it to `callback`, in order.
///
/// - The end of the stream ends the iteration successfully.
/// - A decode error is returned as is; the stream has already closed itself.
/// - [`STOP`] closes the stream and ends the iteration successfully, unless
///   closing fails.
/// - A callback error closes the stream and is returned; a failure while
///   closing is discarded in its favor.
///
/// Absent streams and callbacks are rejected before anything is read.
pub fn iterate<T, R, E, F>(
    stream: Option<&mut JsonStream<R>>,
    callback: Option<F>,
) -> Result<(), E>
where
    T: DeserializeOwned,
    R: Read,
    E: From<Error>,
    F: FnMut(T) -> Result<Flow, E>,
{
    let stream = stream.ok_or(Error::NilStream)?;
    let mut callback = callback.ok_or(Error::NilCallback)?;
    while let Some(item) = stream.next::<T>()? {
        match callback(item) {
            Ok(ControlFlow::Continue(())) => {}
            Ok(ControlFlow::Break(())) => {
                stream.close()?;
                return Ok(());
            }
            Err(err) => {
                let _ = stream.close();
                return Err(err);
            }
        }
    }
    Ok(())
}
