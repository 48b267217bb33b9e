//! Error types for frame encoding and transmission.

/// Frame field a value was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Command,
    Device,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Command => "command",
            Field::Device => "device",
        }
    }
}

/// Rejected (device, command) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// E01: Value does not fit the profile's field width
    OutOfRange { field: Field, value: u8, max: u8 },
    /// Profile cannot encode any frame
    Profile(ProfileError),
}

impl EncodeError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "E01",
            Self::Profile(e) => e.code(),
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "value out of range",
            Self::Profile(e) => e.message(),
        }
    }
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange { field, value, max } => write!(
                f,
                "{}: {} {} (0x{:02X}) exceeds 0x{:02X}",
                self.code(),
                field.as_str(),
                self.message(),
                value,
                max
            ),
            Self::Profile(e) => write!(f, "{}", e),
        }
    }
}

/// Violated `ProtocolProfile` invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    /// E10: Carrier frequency zero or above 1 MHz
    Carrier,
    /// E11: Duty cycle outside 1..=99 percent
    DutyCycle,
    /// E12: Burst lengths not ordered one > zero > 0, or empty start burst
    BurstLengths,
    /// E13: Field width outside 1..=8 bits
    FieldWidth,
}

impl ProfileError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Carrier => "E10",
            Self::DutyCycle => "E11",
            Self::BurstLengths => "E12",
            Self::FieldWidth => "E13",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Carrier => "invalid carrier frequency",
            Self::DutyCycle => "invalid duty cycle",
            Self::BurstLengths => "invalid burst lengths",
            Self::FieldWidth => "invalid field width",
        }
    }
}

impl core::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Failure while sending a frame.
///
/// `E` is the output pin's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError<E> {
    /// Request rejected before any output was driven.
    Encode(EncodeError),
    /// Configured profile is unusable.
    Profile(ProfileError),
    /// Output pin reported an error; the waveform is incomplete.
    Pin(E),
}

impl<E> From<EncodeError> for TransmitError<E> {
    fn from(e: EncodeError) -> Self {
        match e {
            EncodeError::Profile(p) => TransmitError::Profile(p),
            e => TransmitError::Encode(e),
        }
    }
}

impl<E> From<ProfileError> for TransmitError<E> {
    fn from(e: ProfileError) -> Self {
        TransmitError::Profile(e)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for TransmitError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "{}", e),
            Self::Profile(e) => write!(f, "{}", e),
            Self::Pin(e) => write!(f, "E20: output pin error: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = EncodeError::OutOfRange {
            field: Field::Command,
            value: 0x80,
            max: 0x7F,
        };
        let text = format!("{}", err);
        assert!(text.starts_with("E01"));
        assert!(text.contains("command"));
        assert!(text.contains("0x80"));
        assert!(text.contains("0x7F"));
    }

    #[test]
    fn test_transmit_error_from_encode() {
        let err: TransmitError<()> = EncodeError::OutOfRange {
            field: Field::Device,
            value: 32,
            max: 31,
        }
        .into();
        assert!(matches!(err, TransmitError::Encode(_)));
    }

    #[test]
    fn test_profile_error_lifts_out_of_encode() {
        let err: TransmitError<()> = EncodeError::Profile(ProfileError::FieldWidth).into();
        assert_eq!(err, TransmitError::Profile(ProfileError::FieldWidth));
        assert_eq!(format!("{}", err), "E13: invalid field width");
    }
}
